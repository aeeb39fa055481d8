//! Noyau de calcul multi-modes
//!
//! Organisation interne :
//! - erreurs.rs    : taxonomie publique (textes d'affichage)
//! - jetons.rs     : tokenisation (littéraux lus dans la base active)
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST + évaluation f64
//! - modes.rs      : modes angle/base, équilibrage, conversion d'angle
//! - eval.rs       : pipeline complet
//! - format.rs     : rendu numérique déterministe
//! - saisie.rs     : tampon d'expression + projection d'affichage
//! - memoire.rs    : registre mémoire
//! - historique.rs : journal borné des calculs
//! - dates.rs      : écart calendaire
//! - unites.rs     : conversion d'unités

pub mod dates;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod memoire;
pub mod modes;
pub mod rpn;
pub mod saisie;
pub mod unites;

#[cfg(test)]
mod tests_noyau;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{ErreurCalcul, ResultatCalcul};
pub use eval::evaluer_expression;
