//! src/app/etat.rs
//!
//! Session de calcul (sans vue, sans parsing).
//!
//! Rôle : porter l'état complet d'une calculatrice (tampon de saisie,
//! modes, mémoire, historique, lignes d'affichage) et exposer les
//! événements de l'interface. Chaque événement retourne un instantané
//! d'affichage immuable : la couche de rendu (terminal, web, native)
//! n'accède jamais à l'état interne.
//!
//! Contrats :
//! - Aucun état ambiant : plusieurs Session coexistent librement.
//! - Après une erreur d'évaluation, le tampon repart à vide ; mémoire,
//!   historique et modes ne bougent pas.
//! - Les conversions et l'écart de dates sont transitoires : ils ne
//!   touchent ni au tampon ni aux lignes de la calculatrice.

use tracing::debug;

use crate::noyau::dates;
use crate::noyau::erreurs::ErreurCalcul;
use crate::noyau::eval::evaluer_expression;
use crate::noyau::format::formater_valeur;
use crate::noyau::historique::Historique;
use crate::noyau::memoire::Memoire;
use crate::noyau::modes::{ModeAngle, ModeBase};
use crate::noyau::saisie::Saisie;
use crate::noyau::unites::{self, Categorie};

/// Instantané d'affichage retourné par chaque événement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affichage {
    /// Ligne d'expression (projection complète ; vidée après évaluation).
    pub expression: String,
    /// Affichage principal : saisie tronquée, résultat, ou texte d'erreur.
    pub principal: String,
    /// Erreur du dernier événement, le cas échéant (même texte qu'affiché).
    pub erreur: Option<String>,
    /// Témoin "M" du registre mémoire.
    pub temoin_memoire: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpMemoire {
    Effacer,
    Rappeler,
    Ajouter,
    Soustraire,
    Stocker,
}

#[derive(Clone, Debug)]
pub struct Session {
    saisie: Saisie,
    mode_angle: ModeAngle,
    mode_base: ModeBase,
    memoire: Memoire,
    historique: Historique,

    // lignes d'affichage entretenues au fil des événements
    ligne_expression: String,
    principal: String,
    erreur: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            saisie: Saisie::default(),
            mode_angle: ModeAngle::default(),
            mode_base: ModeBase::default(),
            memoire: Memoire::default(),
            historique: Historique::default(),
            ligne_expression: String::new(),
            principal: "0".to_string(),
            erreur: None,
        }
    }
}

impl Session {
    /* ------------------------ Saisie ------------------------ */

    /// Ajoute un jeton pré-rendu (chiffre, opérateur, parenthèse, point,
    /// constante `pi`/`e`). Un chiffre illégal dans la base active est
    /// ignoré sans modifier l'état.
    pub fn jeton(&mut self, tok: &str) -> Affichage {
        if let Some(c) = jeton_chiffre(tok) {
            if !self.mode_base.saisie_legale(c) {
                debug!(jeton = tok, base = self.mode_base.nom(), "chiffre hors base, ignoré");
                return self.instantane();
            }
        }

        self.saisie.ajouter(tok);
        self.rafraichir_saisie();
        self.instantane()
    }

    /// Ajoute un appel de fonction : `sin` devient `sin(`.
    /// Seules les fonctions de la grammaire d'entrée sont acceptées.
    pub fn fonction(&mut self, nom: &str) -> Affichage {
        let nom = nom.to_ascii_lowercase();
        match nom.as_str() {
            "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "sqrt" | "log" | "log10" => {
                self.saisie.ajouter(&format!("{nom}("));
                self.rafraichir_saisie();
            }
            _ => debug!(fonction = %nom, "fonction inconnue, ignorée"),
        }
        self.instantane()
    }

    pub fn retour_arriere(&mut self) -> Affichage {
        self.saisie.retour_arriere();
        self.rafraichir_saisie();
        self.instantane()
    }

    /// C : remise à zéro du tampon et des lignes.
    pub fn effacer(&mut self) -> Affichage {
        self.saisie.effacer();
        self.ligne_expression.clear();
        self.principal = "0".to_string();
        self.erreur = None;
        self.instantane()
    }

    /// CE : identique à C (tampon unique, pas de dernier opérande).
    pub fn effacer_entree(&mut self) -> Affichage {
        self.effacer()
    }

    /* ------------------------ Évaluation ------------------------ */

    pub fn evaluer(&mut self) -> Affichage {
        if self.saisie.est_vide() {
            return self.instantane();
        }

        let expression = self.saisie.brute().to_string();
        match evaluer_expression(&expression, self.mode_angle, self.mode_base) {
            Ok(v) => {
                let texte = formater_valeur(v);
                self.historique.enregistrer(expression, texte.clone());

                // le résultat devient le tampon ; la ligne d'expression se vide
                self.saisie.remplacer(&texte);
                self.ligne_expression.clear();
                self.principal = texte;
                self.erreur = None;
            }
            Err(e) => {
                let texte = e.to_string();
                debug!(expression = %expression, erreur = %texte, "évaluation en échec");

                // tampon remis à vide : la prochaine saisie repart propre
                self.saisie.marquer_erreur();
                self.principal = texte.clone();
                self.erreur = Some(texte);
            }
        }
        self.instantane()
    }

    /* ------------------------ Modes ------------------------ */

    pub fn regler_mode_angle(&mut self, mode: ModeAngle) -> Affichage {
        self.mode_angle = mode;
        debug!(mode = mode.nom(), "mode d'angle");
        self.instantane()
    }

    pub fn regler_mode_base(&mut self, base: ModeBase) -> Affichage {
        self.mode_base = base;
        debug!(base = base.nom(), "base numérique");
        self.instantane()
    }

    pub fn mode_angle(&self) -> ModeAngle {
        self.mode_angle
    }

    pub fn mode_base(&self) -> ModeBase {
        self.mode_base
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MC/MR/M+/M-/MS. L'opérande de M+/M-/MS est la valeur de l'affichage
    /// principal quand elle se lit comme un nombre ; sinon l'opération est
    /// sans effet.
    pub fn memoire(&mut self, op: OpMemoire) -> Affichage {
        match op {
            OpMemoire::Effacer => self.memoire.effacer(),
            OpMemoire::Rappeler => {
                let v = self.memoire.rappeler();
                self.remplacer_par_valeur(v);
            }
            OpMemoire::Ajouter | OpMemoire::Soustraire | OpMemoire::Stocker => {
                if let Some(v) = self.valeur_affichee() {
                    match op {
                        OpMemoire::Ajouter => self.memoire.ajouter(v),
                        OpMemoire::Soustraire => self.memoire.soustraire(v),
                        OpMemoire::Stocker => self.memoire.stocker(v),
                        _ => unreachable!(),
                    }
                }
            }
        }
        self.instantane()
    }

    /* ------------------------ Opérations sur la valeur affichée ------------------------ */

    /// ± : remplace le tampon par l'opposé de la valeur affichée.
    pub fn inverser_signe(&mut self) -> Affichage {
        if let Some(v) = self.valeur_affichee() {
            self.remplacer_par_valeur(-v);
        }
        self.instantane()
    }

    /// 1/x ; sans effet sur zéro ou sur un affichage non numérique.
    pub fn inverse(&mut self) -> Affichage {
        if let Some(v) = self.valeur_affichee() {
            if v != 0.0 {
                self.remplacer_par_valeur(1.0 / v);
            }
        }
        self.instantane()
    }

    /// n! de la valeur affichée (entière, positive). Un dépassement de
    /// capacité du f64 est traité comme une évaluation en échec.
    pub fn factorielle(&mut self) -> Affichage {
        if let Some(v) = self.valeur_affichee() {
            if v >= 0.0 && v.fract() == 0.0 {
                match factorielle_f64(v) {
                    Some(r) => self.remplacer_par_valeur(r),
                    None => {
                        let texte = ErreurCalcul::ExpressionInvalide.to_string();
                        self.saisie.marquer_erreur();
                        self.principal = texte.clone();
                        self.erreur = Some(texte);
                    }
                }
            }
        }
        self.instantane()
    }

    /* ------------------------ Utilitaires annexes ------------------------ */

    /// Conversion d'unités : transitoire, l'état de la calculatrice ne
    /// bouge pas ; seul l'instantané retourné porte le texte.
    pub fn convertir(&self, valeur: f64, de: &str, vers: &str, categorie: &str) -> Affichage {
        let resultat = Categorie::depuis_nom(categorie)
            .ok_or(ErreurCalcul::ConversionIndisponible)
            .and_then(|cat| unites::convertir(valeur, de, vers, cat));

        match resultat {
            Ok(r) => self.instantane_avec(unites::format_conversion(valeur, de, vers, r), None),
            Err(e) => self.instantane_avec(e.to_string(), Some(e.to_string())),
        }
    }

    /// Écart entre deux dates ISO : transitoire, comme la conversion.
    pub fn ecart_dates(&self, date1: &str, date2: &str) -> Affichage {
        match dates::ecart_dates(date1, date2) {
            Ok(e) => self.instantane_avec(dates::format_ecart(&e), None),
            Err(e) => self.instantane_avec(e.to_string(), Some(e.to_string())),
        }
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    /// Instantané courant, sans événement (rafraîchissement de vue).
    pub fn affichage(&self) -> Affichage {
        self.instantane()
    }

    /* ------------------------ Interne ------------------------ */

    fn instantane(&self) -> Affichage {
        Affichage {
            expression: self.ligne_expression.clone(),
            principal: self.principal.clone(),
            erreur: self.erreur.clone(),
            temoin_memoire: self.memoire.active(),
        }
    }

    fn instantane_avec(&self, principal: String, erreur: Option<String>) -> Affichage {
        Affichage {
            expression: self.ligne_expression.clone(),
            principal,
            erreur,
            temoin_memoire: self.memoire.active(),
        }
    }

    fn rafraichir_saisie(&mut self) {
        self.ligne_expression = self.saisie.projection();
        self.principal = self.saisie.projection_principale();
        self.erreur = None;
    }

    /// Valeur numérique de l'affichage principal, si elle se lit comme un
    /// nombre (le moins symbolique `−` est ramené à l'ASCII).
    fn valeur_affichee(&self) -> Option<f64> {
        self.principal
            .replace('−', "-")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Remplace le tampon par une valeur formatée (MR, ±, 1/x, n!).
    fn remplacer_par_valeur(&mut self, v: f64) {
        let texte = formater_valeur(v);
        self.saisie.remplacer(&texte);
        self.ligne_expression = self.saisie.projection();
        self.principal = texte;
        self.erreur = None;
    }
}

/// Jeton d'un seul caractère soumis à la légalité de base.
fn jeton_chiffre(tok: &str) -> Option<char> {
    let mut it = tok.chars();
    let c = it.next()?;
    if it.next().is_some() {
        return None;
    }
    (c.is_ascii_digit() || ('A'..='F').contains(&c) || c == '.').then_some(c)
}

/// Factorielle en f64 ; None au-delà de la capacité du double.
fn factorielle_f64(v: f64) -> Option<f64> {
    if v > 170.0 {
        return None;
    }
    let n = v as u32;
    let mut acc = 1.0f64;
    for k in 2..=n {
        acc *= f64::from(k);
    }
    Some(acc)
}
