// src/main.rs
//
// Calculatrice multi-modes — point d'entrée
// -----------------------------------------
// But:
// - Options de démarrage (mode d'angle, base, évaluation one-shot)
// - Initialisation du journal (RUST_LOG)
// - Puis la main à la vue terminale (app/vue.rs)
//
// IMPORTANT (structure projet):
// - Toute la logique vit dans app/etat.rs (session) et noyau/ (calcul)
// - Ici: point d'entrée seulement

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod noyau;

use app::Session;
use noyau::modes::{ModeAngle, ModeBase};

/// Calculatrice multi-modes (standard, scientifique, programmeur,
/// dates, conversions) en terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Options {
    /// Mode d'angle initial: deg, rad ou grad
    #[arg(long, default_value = "deg")]
    angle: String,

    /// Base numérique initiale: dec, hex, oct ou bin
    #[arg(long, default_value = "dec")]
    base: String,

    /// Évalue une expression et quitte (pas de boucle interactive)
    #[arg(long)]
    calc: Option<String>,
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();

    let angle = ModeAngle::depuis_nom(&options.angle).unwrap_or_else(|| {
        eprintln!("mode d'angle inconnu: {} (deg, rad ou grad)", options.angle);
        std::process::exit(2);
    });
    let base = ModeBase::depuis_nom(&options.base).unwrap_or_else(|| {
        eprintln!("base inconnue: {} (dec, hex, oct ou bin)", options.base);
        std::process::exit(2);
    });

    let mut session = Session::default();
    session.regler_mode_angle(angle);
    session.regler_mode_base(base);

    // one-shot : l'expression passe par la même saisie que les touches
    if let Some(expression) = options.calc {
        let mut tampon = [0u8; 4];
        for c in expression.chars().filter(|c| !c.is_whitespace()) {
            session.jeton(c.encode_utf8(&mut tampon));
        }
        let affichage = session.evaluer();
        println!("{}", affichage.principal);
        if affichage.erreur.is_some() {
            std::process::exit(1);
        }
        return Ok(());
    }

    app::vue::boucle(&mut session)
}
