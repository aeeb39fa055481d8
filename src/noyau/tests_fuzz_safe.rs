//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs du domaine (division par zéro, opérande
//!   bit-à-bit non entier, ...) mais jamais de panique
//! - invariant clé : toute valeur retournée Ok est FINIE

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalcul;
use super::eval::evaluer_expression;
use super::format::formater_valeur;
use super::modes::{ModeAngle, ModeBase};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {max:?}");
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("{}.{}", rng.pick(50), rng.pick(100)),
        _ => format!("{}", rng.pick(100)),
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_atome(rng);
    }

    match rng.pick(8) {
        0 => format!("-{}", gen_expr(rng, profondeur - 1)),
        1 => {
            let f = ["sin", "cos", "tan", "sqrt", "log", "atan"][rng.pick(6) as usize];
            format!("{f}({})", gen_expr(rng, profondeur - 1))
        }
        2 => format!("({})", gen_expr(rng, profondeur - 1)),
        3 => {
            // bit-à-bit sur petits entiers (souvent valide, parfois non)
            let op = ["&", "|", "^", "<<", ">>"][rng.pick(5) as usize];
            format!("{}{op}{}", rng.pick(64), rng.pick(8))
        }
        4 => format!("{}**{}", gen_atome(rng), rng.pick(4)),
        _ => {
            let op = ["+", "-", "*", "/", "%"][rng.pick(5) as usize];
            let a = gen_expr(rng, profondeur - 1);
            let b = if rng.coin() {
                gen_atome(rng)
            } else {
                gen_expr(rng, profondeur - 1)
            };
            format!("{a}{op}{b}")
        }
    }
}

/* ------------------------ Les tests ------------------------ */

#[test]
fn fuzz_jamais_de_panique_et_ok_toujours_fini() {
    let start = Instant::now();
    let mut rng = Rng::new(0xCA1C);

    for _ in 0..600 {
        budget(start, Duration::from_secs(10));

        let s = gen_expr(&mut rng, 4);
        match evaluer_expression(&s, ModeAngle::Rad, ModeBase::Dec) {
            Ok(v) => {
                assert!(v.is_finite(), "Ok non fini pour {s:?}");
                // le rendu ne panique jamais sur une valeur retournée
                let _ = formater_valeur(v);
            }
            Err(e) => {
                // seules les erreurs de calcul peuvent sortir du pipeline
                assert!(
                    matches!(
                        e,
                        ErreurCalcul::DivisionParZero | ErreurCalcul::ExpressionInvalide
                    ),
                    "erreur inattendue {e:?} pour {s:?}"
                );
            }
        }
    }
}

#[test]
fn fuzz_deterministe() {
    let start = Instant::now();
    let mut rng = Rng::new(42);

    for _ in 0..200 {
        budget(start, Duration::from_secs(10));

        let s = gen_expr(&mut rng, 3);
        let a = evaluer_expression(&s, ModeAngle::Rad, ModeBase::Dec);
        let b = evaluer_expression(&s, ModeAngle::Rad, ModeBase::Dec);
        assert_eq!(a, b, "évaluation non déterministe pour {s:?}");
    }
}

#[test]
fn fuzz_modes_d_angle_coherents() {
    // la même expression sans trig directe donne le même résultat
    // quel que soit le mode d'angle
    let start = Instant::now();
    let mut rng = Rng::new(7);

    for _ in 0..200 {
        budget(start, Duration::from_secs(10));

        let a = gen_atome(&mut rng);
        let b = gen_atome(&mut rng);
        let s = format!("{a}+{b}*{a}");

        let deg = evaluer_expression(&s, ModeAngle::Deg, ModeBase::Dec);
        let rad = evaluer_expression(&s, ModeAngle::Rad, ModeBase::Dec);
        let grad = evaluer_expression(&s, ModeAngle::Grad, ModeBase::Dec);
        assert_eq!(deg, rad);
        assert_eq!(rad, grad);
    }
}
