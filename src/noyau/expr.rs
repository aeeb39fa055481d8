// src/noyau/expr.rs
//
// AST + évaluation directe en f64
// -------------------------------
// Grammaire close : nombre | constante | fonction unaire | unaire | binaire
// | groupement. Tout identifiant hors de cette grammaire est refusé en amont
// (rpn.rs). L'évaluation classe ses échecs :
// - diviseur nul (/ et %) et débordement arithmétique vers ±∞ => DivisionParZero
// - domaine de fonction invalide (résultat non fini) et opérandes bit-à-bit
//   non entiers => ExpressionInvalide

use std::f64::consts::{E, PI};

use super::erreurs::{ErreurCalcul, ResultatCalcul};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    NonBin, // ~
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sous,
    Mul,
    Div,
    Mod,
    Pow,
    EtBin,
    OuBin,
    OuExcl,
    DecalG,
    DecalD,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,   // logarithme naturel
    Log10,
    Radians, // degrés -> radians
    Grades,  // grades -> radians
}

impl Fonction {
    /// Résolution d'un identifiant (déjà en minuscules) vers la grammaire.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        let f = match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "asin" => Fonction::Asin,
            "acos" => Fonction::Acos,
            "atan" => Fonction::Atan,
            "sqrt" => Fonction::Sqrt,
            "log" => Fonction::Log,
            "log10" => Fonction::Log10,
            "radians" => Fonction::Radians,
            "grades" => Fonction::Grades,
            _ => return None,
        };
        Some(f)
    }
}

#[derive(Clone, Debug)]
pub enum Expr {
    Nombre(f64),
    Pi,
    Euler,
    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Fonction(Fonction, Box<Expr>),
}

impl Expr {
    pub fn evaluer(&self) -> ResultatCalcul {
        match self {
            Expr::Nombre(v) => Ok(*v),
            Expr::Pi => Ok(PI),
            Expr::Euler => Ok(E),

            Expr::Unaire(op, x) => {
                let v = x.evaluer()?;
                match op {
                    OpUnaire::Neg => Ok(-v),
                    OpUnaire::NonBin => Ok(!en_entier(v)? as f64),
                }
            }

            Expr::Binaire(op, a, b) => {
                let va = a.evaluer()?;
                let vb = b.evaluer()?;
                appliquer_binaire(*op, va, vb)
            }

            Expr::Fonction(f, x) => {
                let v = x.evaluer()?;
                let r = appliquer_fonction(*f, v);
                // argument fini mais résultat non fini => hors domaine
                if r.is_finite() {
                    Ok(r)
                } else {
                    Err(ErreurCalcul::ExpressionInvalide)
                }
            }
        }
    }
}

fn appliquer_binaire(op: OpBinaire, a: f64, b: f64) -> ResultatCalcul {
    let r = match op {
        OpBinaire::Add => a + b,
        OpBinaire::Sous => a - b,
        OpBinaire::Mul => a * b,

        OpBinaire::Div => {
            if b == 0.0 {
                return Err(ErreurCalcul::DivisionParZero);
            }
            a / b
        }

        // modulo flottant, signe du diviseur
        OpBinaire::Mod => {
            if b == 0.0 {
                return Err(ErreurCalcul::DivisionParZero);
            }
            a - b * (a / b).floor()
        }

        OpBinaire::Pow => {
            let p = a.powf(b);
            if p.is_nan() {
                // base négative, exposant fractionnaire : pas de réel
                return Err(ErreurCalcul::ExpressionInvalide);
            }
            p
        }

        OpBinaire::EtBin => (en_entier(a)? & en_entier(b)?) as f64,
        OpBinaire::OuBin => (en_entier(a)? | en_entier(b)?) as f64,
        OpBinaire::OuExcl => (en_entier(a)? ^ en_entier(b)?) as f64,

        OpBinaire::DecalG => {
            let n = en_decalage(b)?;
            let large = (en_entier(a)? as i128) << n;
            i64::try_from(large).map_err(|_| ErreurCalcul::ExpressionInvalide)? as f64
        }
        OpBinaire::DecalD => (en_entier(a)? >> en_decalage(b)?) as f64,
    };

    if r.is_infinite() {
        return Err(ErreurCalcul::DivisionParZero);
    }
    if r.is_nan() {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    Ok(r)
}

fn appliquer_fonction(f: Fonction, v: f64) -> f64 {
    match f {
        Fonction::Sin => v.sin(),
        Fonction::Cos => v.cos(),
        Fonction::Tan => v.tan(),
        Fonction::Asin => v.asin(),
        Fonction::Acos => v.acos(),
        Fonction::Atan => v.atan(),
        Fonction::Sqrt => v.sqrt(),
        Fonction::Log => v.ln(),
        Fonction::Log10 => v.log10(),
        Fonction::Radians => v.to_radians(),
        Fonction::Grades => v * PI / 200.0,
    }
}

/// Opérande bit-à-bit : double entier dans la plage i64, sinon invalide.
fn en_entier(v: f64) -> Result<i64, ErreurCalcul> {
    if v.fract() != 0.0 || !v.is_finite() {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    if v < i64::MIN as f64 || v > i64::MAX as f64 {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    Ok(v as i64)
}

/// Compte de décalage : entier dans 0..=63.
fn en_decalage(v: f64) -> Result<u32, ErreurCalcul> {
    let n = en_entier(v)?;
    if !(0..=63).contains(&n) {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    Ok(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nb(v: f64) -> Box<Expr> {
        Box::new(Expr::Nombre(v))
    }

    #[test]
    fn modulo_signe_du_diviseur() {
        assert_eq!(appliquer_binaire(OpBinaire::Mod, 7.0, 3.0).unwrap(), 1.0);
        assert_eq!(appliquer_binaire(OpBinaire::Mod, 5.0, -3.0).unwrap(), -1.0);
        assert_eq!(appliquer_binaire(OpBinaire::Mod, -5.0, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn bit_a_bit_exige_entiers() {
        assert_eq!(
            appliquer_binaire(OpBinaire::EtBin, 1.5, 2.0),
            Err(ErreurCalcul::ExpressionInvalide)
        );
        assert_eq!(appliquer_binaire(OpBinaire::EtBin, 6.0, 3.0).unwrap(), 2.0);
    }

    #[test]
    fn decalage_borne() {
        assert_eq!(appliquer_binaire(OpBinaire::DecalG, 1.0, 4.0).unwrap(), 16.0);
        assert_eq!(
            appliquer_binaire(OpBinaire::DecalG, 1.0, -1.0),
            Err(ErreurCalcul::ExpressionInvalide)
        );
        assert_eq!(
            appliquer_binaire(OpBinaire::DecalG, 1.0, 64.0),
            Err(ErreurCalcul::ExpressionInvalide)
        );
    }

    #[test]
    fn non_binaire_complement() {
        let e = Expr::Unaire(OpUnaire::NonBin, nb(5.0));
        assert_eq!(e.evaluer().unwrap(), -6.0);
    }

    #[test]
    fn zero_puissance_negative_diverge() {
        assert_eq!(
            appliquer_binaire(OpBinaire::Pow, 0.0, -1.0),
            Err(ErreurCalcul::DivisionParZero)
        );
    }

    #[test]
    fn fonction_hors_domaine() {
        let e = Expr::Fonction(Fonction::Sqrt, nb(-1.0));
        assert_eq!(e.evaluer(), Err(ErreurCalcul::ExpressionInvalide));

        let e = Expr::Fonction(Fonction::Log, nb(0.0));
        assert_eq!(e.evaluer(), Err(ErreurCalcul::ExpressionInvalide));

        let e = Expr::Fonction(Fonction::Asin, nb(2.0));
        assert_eq!(e.evaluer(), Err(ErreurCalcul::ExpressionInvalide));
    }
}
