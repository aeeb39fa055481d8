// src/noyau/dates.rs
//
// Écart entre deux dates calendaires
// ----------------------------------
// Entrée ISO stricte (YYYY-MM-DD). Le compte de jours est calendaire
// exact (chrono) ; la décomposition années/mois/jours utilise l'année de
// 365 jours et le mois de 30 jours, comme l'outil d'origine — les deux
// décompositions ne coïncident donc pas avec le calendrier réel.

use chrono::NaiveDate;

use super::erreurs::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcartDates {
    /// Nombre total de jours, en valeur absolue.
    pub jours: i64,
    pub annees: i64,
    pub mois: i64,
    pub jours_restants: i64,
}

/// Écart absolu entre deux dates ISO `YYYY-MM-DD`.
pub fn ecart_dates(date1: &str, date2: &str) -> Result<EcartDates, ErreurCalcul> {
    let d1 = lire_date(date1)?;
    let d2 = lire_date(date2)?;

    let jours = (d2 - d1).num_days().abs();

    Ok(EcartDates {
        jours,
        annees: jours / 365,
        mois: (jours % 365) / 30,
        jours_restants: (jours % 365) % 30,
    })
}

fn lire_date(s: &str) -> Result<NaiveDate, ErreurCalcul> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ErreurCalcul::FormatDateInvalide)
}

/// Phrase d'affichage pour la vue.
pub fn format_ecart(e: &EcartDates) -> String {
    format!(
        "Difference: {} days\n({} years, {} months, {} days)",
        e.jours, e.annees, e.mois, e.jours_restants
    )
}
