//! Tests du pipeline complet : transformation -> jetons -> RPN -> valeur
//! -> format. Les cas sont regroupés par thème ; les modules individuels
//! portent leurs propres tests unitaires.

use super::erreurs::ErreurCalcul;
use super::eval::evaluer_expression;
use super::format::formater_valeur;
use super::modes::{ModeAngle, ModeBase};

/* ------------------------ Helpers ------------------------ */

fn ok(s: &str) -> f64 {
    evaluer_expression(s, ModeAngle::Rad, ModeBase::Dec)
        .unwrap_or_else(|e| panic!("evaluer_expression({s:?}) erreur: {e}"))
}

fn ok_texte(s: &str) -> String {
    formater_valeur(ok(s))
}

fn erreur(s: &str) -> ErreurCalcul {
    evaluer_expression(s, ModeAngle::Rad, ModeBase::Dec)
        .expect_err("une erreur était attendue")
}

fn proche(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "attendu {b}, obtenu {a}");
}

/* ------------------------ Arithmétique IEEE ------------------------ */

#[test]
fn ordre_des_operations() {
    assert_eq!(ok("2+3*4"), 14.0);
    assert_eq!(ok("(2+3)*4"), 20.0);
    assert_eq!(ok("10-4-3"), 3.0);
    assert_eq!(ok("20/4/5"), 1.0);
}

#[test]
fn modulo() {
    assert_eq!(ok("17%5"), 2.0);
    assert_eq!(ok("7.5%2"), 1.5);
}

#[test]
fn puissances() {
    assert_eq!(ok("2**10"), 1024.0);
    assert_eq!(ok("9**0.5"), 3.0);
    assert_eq!(ok("2**3**2"), 512.0); // associativité droite
}

/* ------------------------ Bit-à-bit ------------------------ */

#[test]
fn operations_bit_a_bit() {
    assert_eq!(ok("6&3"), 2.0);
    assert_eq!(ok("6|3"), 7.0);
    assert_eq!(ok("6^3"), 5.0);
    assert_eq!(ok("~5"), -6.0);
    assert_eq!(ok("1<<10"), 1024.0);
    assert_eq!(ok("256>>4"), 16.0);
}

#[test]
fn precedence_bit_a_bit_sous_arithmetique() {
    // 6&3 | 8^1 == (6&3) | (8^1)
    assert_eq!(ok("6&3|8^1"), 11.0);
    // décalage après l'addition
    assert_eq!(ok("1<<2+1"), 8.0);
}

#[test]
fn bit_a_bit_hors_domaine() {
    assert_eq!(erreur("1.5&2"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("1<<-1"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("1<<64"), ErreurCalcul::ExpressionInvalide);
}

/* ------------------------ Fonctions et constantes ------------------------ */

#[test]
fn fonctions_en_radians() {
    proche(ok("sin(pi/2)"), 1.0);
    proche(ok("cos(0)"), 1.0);
    proche(ok("sqrt(16)"), 4.0);
    proche(ok("log(e)"), 1.0);
    proche(ok("log10(1000)"), 3.0);
    proche(ok("atan(1)"), std::f64::consts::FRAC_PI_4);
}

#[test]
fn constantes() {
    proche(ok("pi"), std::f64::consts::PI);
    proche(ok("2*e"), 2.0 * std::f64::consts::E);
}

#[test]
fn domaines_de_fonctions() {
    assert_eq!(erreur("sqrt(0-1)"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("asin(2)"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("log(0)"), ErreurCalcul::ExpressionInvalide);
}

/* ------------------------ Équilibrage ------------------------ */

#[test]
fn parentheses_ouvertes_equilibrees() {
    assert_eq!(ok("(2+3"), 5.0);
    assert_eq!(ok("((2+3)*(4"), 20.0);
    proche(ok("sqrt(2") * ok("sqrt(2"), 2.0);
}

/* ------------------------ Erreurs et textes ------------------------ */

#[test]
fn division_par_zero_et_debordement() {
    assert_eq!(erreur("5/0"), ErreurCalcul::DivisionParZero);
    assert_eq!(erreur("0/0"), ErreurCalcul::DivisionParZero);
    assert_eq!(erreur("5%0"), ErreurCalcul::DivisionParZero);
    // débordement arithmétique vers ±∞ : même classement
    assert_eq!(erreur("99**999"), ErreurCalcul::DivisionParZero);
}

#[test]
fn syntaxe_refusee() {
    assert_eq!(erreur("2+"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("2 3"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("foo(1)"), ErreurCalcul::ExpressionInvalide);
    assert_eq!(erreur("1e"), ErreurCalcul::ExpressionInvalide);
}

#[test]
fn textes_d_affichage() {
    assert_eq!(ErreurCalcul::DivisionParZero.to_string(), "Cannot divide by zero");
    assert_eq!(ErreurCalcul::ExpressionInvalide.to_string(), "Error");
    assert_eq!(ErreurCalcul::FormatDateInvalide.to_string(), "Invalid date format");
    assert_eq!(ErreurCalcul::ConversionIndisponible.to_string(), "Conversion not available");
}

/* ------------------------ Rendu des résultats ------------------------ */

#[test]
fn rendu_entier_sans_point() {
    assert_eq!(ok_texte("2+3*4"), "14");
    assert_eq!(ok_texte("5-5"), "0");
    assert_eq!(ok_texte("10/4"), "2.5");
}

#[test]
fn rendu_arrondi_dix_decimales() {
    assert_eq!(ok_texte("1/3"), "0.3333333333");
    assert_eq!(ok_texte("2/3"), "0.6666666667");
}

/* ------------------------ Modes d'angle ------------------------ */

#[test]
fn degres_sur_trig_directe_seulement() {
    let v = evaluer_expression("sin(30)", ModeAngle::Deg, ModeBase::Dec).unwrap();
    proche(v, 0.5);

    // l'inverse rend un angle en radians, jamais enveloppé
    let v = evaluer_expression("atan(1)", ModeAngle::Deg, ModeBase::Dec).unwrap();
    proche(v, std::f64::consts::FRAC_PI_4);
}

#[test]
fn grades_conversion_dediee() {
    let v = evaluer_expression("cos(200)", ModeAngle::Grad, ModeBase::Dec).unwrap();
    proche(v, -1.0);
}

/* ------------------------ Bases numériques ------------------------ */

#[test]
fn litteraux_selon_base() {
    assert_eq!(evaluer_expression("777", ModeAngle::Rad, ModeBase::Oct).unwrap(), 511.0);
    assert_eq!(evaluer_expression("1010", ModeAngle::Rad, ModeBase::Bin).unwrap(), 10.0);
    assert_eq!(evaluer_expression("A*B", ModeAngle::Rad, ModeBase::Hex).unwrap(), 110.0);
}

#[test]
fn base_ne_change_pas_les_operateurs() {
    // le domaine de calcul reste le double, seule la lecture change
    assert_eq!(evaluer_expression("10/4", ModeAngle::Rad, ModeBase::Hex).unwrap(), 4.0);
}
