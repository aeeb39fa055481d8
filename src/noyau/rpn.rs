// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name): doit être une fonction de la grammaire, sinon refus
//   (pas de variables dans ce noyau)
// - Moins en position préfixe => opérateur unaire dédié (précédence 7,
//   sous ** : -2**2 vaut -(2**2), et 2**-3 vaut 2**(-3))
// - ~ est toujours préfixe
// - Les fonctions restent "collées" à leur argument et sortent après la
//   parenthèse fermante.

use super::expr::{Expr, Fonction, OpBinaire, OpUnaire};
use super::jetons::Jeton;

/// Élément RPN : les opérateurs y sont déjà résolus (binaire vs préfixe).
#[derive(Clone, Debug)]
pub enum ElemRpn {
    Nombre(f64),
    Pi,
    Euler,
    Binaire(OpBinaire),
    Unaire(OpUnaire),
    Fonction(Fonction),
}

/// Pile d'opérateurs du shunting-yard.
#[derive(Clone, Debug)]
enum OpPile {
    Binaire(OpBinaire),
    Unaire(OpUnaire),
    Fonction(Fonction),
    ParG,
}

const PREC_UNAIRE: i32 = 7;

fn precedence(op: OpBinaire) -> i32 {
    match op {
        OpBinaire::OuBin => 1,
        OpBinaire::OuExcl => 2,
        OpBinaire::EtBin => 3,
        OpBinaire::DecalG | OpBinaire::DecalD => 4,
        OpBinaire::Add | OpBinaire::Sous => 5,
        OpBinaire::Mul | OpBinaire::Div | OpBinaire::Mod => 6,
        OpBinaire::Pow => 8,
    }
}

fn associatif_droite(op: OpBinaire) -> bool {
    matches!(op, OpBinaire::Pow)
}

fn op_binaire(j: &Jeton) -> Option<OpBinaire> {
    let op = match j {
        Jeton::Plus => OpBinaire::Add,
        Jeton::Moins => OpBinaire::Sous,
        Jeton::Etoile => OpBinaire::Mul,
        Jeton::Barre => OpBinaire::Div,
        Jeton::Pourcent => OpBinaire::Mod,
        Jeton::Puissance => OpBinaire::Pow,
        Jeton::EtBin => OpBinaire::EtBin,
        Jeton::OuBin => OpBinaire::OuBin,
        Jeton::OuExcl => OpBinaire::OuExcl,
        Jeton::DecalG => OpBinaire::DecalG,
        Jeton::DecalD => OpBinaire::DecalD,
        _ => return None,
    };
    Some(op)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Ident("sin"), ParG, Pi, Barre, Nombre(2), ParD]
///   rpn:    [Pi, Nombre(2), Binaire(Div), Fonction(Sin)]
pub fn to_rpn(jetons: &[Jeton]) -> Result<Vec<ElemRpn>, String> {
    let mut out: Vec<ElemRpn> = Vec::new();
    let mut ops: Vec<OpPile> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à distinguer moins unaire et moins binaire.
    let mut prev_was_value = false;

    for jeton in jetons.iter().cloned() {
        match jeton {
            Jeton::Nombre(v) => {
                out.push(ElemRpn::Nombre(v));
                prev_was_value = true;
            }
            Jeton::Pi => {
                out.push(ElemRpn::Pi);
                prev_was_value = true;
            }
            Jeton::Euler => {
                out.push(ElemRpn::Euler);
                prev_was_value = true;
            }

            Jeton::Ident(nom) => {
                let f = Fonction::depuis_nom(&nom)
                    .ok_or_else(|| format!("identifiant inconnu: '{nom}'"))?;
                // fonction : elle sortira après son argument
                ops.push(OpPile::Fonction(f));
                prev_was_value = false;
            }

            Jeton::ParG => {
                ops.push(OpPile::ParG);
                prev_was_value = false;
            }

            Jeton::ParD => {
                // dépile jusqu'à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    match top {
                        OpPile::ParG => {
                            ouvrante = true;
                            break;
                        }
                        OpPile::Binaire(op) => out.push(ElemRpn::Binaire(op)),
                        OpPile::Unaire(op) => out.push(ElemRpn::Unaire(op)),
                        OpPile::Fonction(f) => out.push(ElemRpn::Fonction(f)),
                    }
                }
                if !ouvrante {
                    return Err("parenthèse fermante orpheline".into());
                }

                // si une fonction est au sommet, elle sort avec sa parenthèse
                if let Some(OpPile::Fonction(_)) = ops.last() {
                    if let Some(OpPile::Fonction(f)) = ops.pop() {
                        out.push(ElemRpn::Fonction(f));
                    }
                }

                prev_was_value = true;
            }

            Jeton::NonBin => {
                if prev_was_value {
                    return Err("'~' en position infixe".into());
                }
                ops.push(OpPile::Unaire(OpUnaire::NonBin));
                prev_was_value = false;
            }

            Jeton::Moins if !prev_was_value => {
                ops.push(OpPile::Unaire(OpUnaire::Neg));
                prev_was_value = false;
            }

            // plus unaire : neutre, on l'ignore
            Jeton::Plus if !prev_was_value => {}

            _ => {
                // opérateur binaire
                let op = op_binaire(&jeton).ok_or("jeton inattendu")?;

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - on ne traverse pas une fonction (collée à son argument)
                // - la précédence/associativité exige de sortir le sommet
                while let Some(top) = ops.last() {
                    let p_top = match top {
                        OpPile::ParG | OpPile::Fonction(_) => break,
                        OpPile::Unaire(_) => PREC_UNAIRE,
                        OpPile::Binaire(op2) => precedence(*op2),
                    };

                    let p_op = precedence(op);
                    let doit_pop = if associatif_droite(op) {
                        p_top > p_op
                    } else {
                        p_top >= p_op
                    };
                    if !doit_pop {
                        break;
                    }

                    match ops.pop() {
                        Some(OpPile::Binaire(op2)) => out.push(ElemRpn::Binaire(op2)),
                        Some(OpPile::Unaire(op2)) => out.push(ElemRpn::Unaire(op2)),
                        _ => unreachable!(),
                    }
                }

                ops.push(OpPile::Binaire(op));
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            OpPile::ParG => return Err("parenthèses non fermées".into()),
            OpPile::Binaire(op2) => out.push(ElemRpn::Binaire(op2)),
            OpPile::Unaire(op2) => out.push(ElemRpn::Unaire(op2)),
            OpPile::Fonction(f) => out.push(ElemRpn::Fonction(f)),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for elem in rpn.iter().cloned() {
        match elem {
            ElemRpn::Nombre(v) => st.push(Expr::Nombre(v)),
            ElemRpn::Pi => st.push(Expr::Pi),
            ElemRpn::Euler => st.push(Expr::Euler),

            ElemRpn::Binaire(op) => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Binaire(op, Box::new(a), Box::new(b)));
            }

            ElemRpn::Unaire(op) => {
                let x = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Unaire(op, Box::new(x)));
            }

            ElemRpn::Fonction(f) => {
                let x = st.pop().ok_or("fonction sans argument")?;
                st.push(Expr::Fonction(f, Box::new(x)));
            }
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    Ok(st.pop().unwrap())
}
