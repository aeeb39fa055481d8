// src/noyau/erreurs.rs
//
// Taxonomie d'erreurs publique du noyau.
// Les textes Display sont EXACTEMENT les textes affichés à l'utilisateur :
// la couche vue les imprime tels quels, sans reformulation.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Division (ou modulo) par zéro, ou débordement arithmétique vers ±∞.
    #[error("Cannot divide by zero")]
    DivisionParZero,

    /// Expression non parsable, jeton hors grammaire, ou entrée de fonction
    /// hors domaine (√ d'un négatif, asin hors [-1,1], ...).
    #[error("Error")]
    ExpressionInvalide,

    /// Date non conforme au format ISO YYYY-MM-DD.
    #[error("Invalid date format")]
    FormatDateInvalide,

    /// Unité inconnue d'un côté ou de l'autre de la conversion.
    #[error("Conversion not available")]
    ConversionIndisponible,
}

/// Résultat d'une évaluation numérique.
pub type ResultatCalcul = Result<f64, ErreurCalcul>;
