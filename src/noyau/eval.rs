//! Noyau — évaluation (pipeline réel)
//!
//! transformer (équilibrage + conversion d'angle) -> tokenize -> RPN
//!        -> Expr -> f64
//!
//! Les erreurs internes (tokenizer, parse) portent un message descriptif ;
//! il part au journal et l'appelant ne voit que la taxonomie publique.

use tracing::debug;

use super::erreurs::{ErreurCalcul, ResultatCalcul};
use super::jetons::{format_jetons, tokenize};
use super::modes::{transformer, ModeAngle, ModeBase};
use super::rpn::{from_rpn, to_rpn};

/// API publique : évalue l'expression brute du tampon de saisie, selon les
/// modes actifs, vers un f64.
///
/// Jamais d'exécution de code dynamique : grammaire close, parser dédié.
pub fn evaluer_expression(brute: &str, angle: ModeAngle, base: ModeBase) -> ResultatCalcul {
    let s = brute.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::ExpressionInvalide);
    }

    // 1) Équilibrage + conversion d'angle
    let transformee = transformer(s, angle);

    // 2) Jetons (littéraux lus dans la base active)
    let jetons = tokenize(&transformee, base).map_err(|e| {
        debug!(brute = %s, cause = %e, "tokenisation refusée");
        ErreurCalcul::ExpressionInvalide
    })?;
    debug!(jetons = %format_jetons(&jetons), "jetons");

    // 3) RPN
    let rpn = to_rpn(&jetons).map_err(|e| {
        debug!(brute = %s, cause = %e, "RPN refusé");
        ErreurCalcul::ExpressionInvalide
    })?;

    // 4) AST
    let expr = from_rpn(&rpn).map_err(|e| {
        debug!(brute = %s, cause = %e, "construction AST refusée");
        ErreurCalcul::ExpressionInvalide
    })?;

    // 5) Valeur
    let v = expr.evaluer()?;
    debug!(brute = %s, valeur = v, "évaluation réussie");
    Ok(v)
}
