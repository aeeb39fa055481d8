//! src/app/vue.rs
//!
//! Vue terminale (REPL)
//! --------------------
//! Couche de rendu : chaque ligne lue est traduite en événements de la
//! session, et l'instantané retourné est imprimé tel quel. Aucune logique
//! de calcul ici — n'importe quelle autre vue (web, native) peut brancher
//! la même session.
//!
//! Protocole de ligne :
//! - une expression se tape comme au clavier de la calculatrice, caractère
//!   par caractère ; un `=` final déclenche l'évaluation ;
//! - les commandes préfixées par `:` couvrent le reste du clavier
//!   (modes, mémoire, historique, dates, conversions).

use std::io::{self, BufRead, Write};

use crate::app::etat::{Affichage, OpMemoire, Session};
use crate::noyau::modes::{ModeAngle, ModeBase};

/// Boucle de lecture ; rend la main sur `q` ou fin d'entrée.
pub fn boucle(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut sortie = io::stdout();

    writeln!(sortie, "calculatrice multi-modes — `?` pour l'aide, `q` pour quitter")?;

    let mut ligne = String::new();
    loop {
        write!(sortie, "> ")?;
        sortie.flush()?;

        ligne.clear();
        if stdin.lock().read_line(&mut ligne)? == 0 {
            break; // fin d'entrée
        }
        let entree = ligne.trim();

        let affichage = match entree {
            "" => continue,
            "q" | "quit" => break,
            "?" | "aide" => {
                aide(&mut sortie)?;
                continue;
            }

            ":c" => session.effacer(),
            ":ce" => session.effacer_entree(),
            ":bs" => session.retour_arriere(),
            ":neg" => session.inverser_signe(),
            ":inv" => session.inverse(),
            ":fact" => session.factorielle(),

            ":mc" => session.memoire(OpMemoire::Effacer),
            ":mr" => session.memoire(OpMemoire::Rappeler),
            ":m+" => session.memoire(OpMemoire::Ajouter),
            ":m-" => session.memoire(OpMemoire::Soustraire),
            ":ms" => session.memoire(OpMemoire::Stocker),

            ":hist" => {
                historique(&mut sortie, session, 10)?;
                continue;
            }

            _ if entree.starts_with(':') => match commande_etendue(session, entree) {
                Some(a) => a,
                None => {
                    writeln!(sortie, "commande inconnue : {entree} (voir `?`)")?;
                    continue;
                }
            },

            _ => saisir_ligne(session, entree),
        };

        afficher(&mut sortie, session, &affichage)?;
    }

    Ok(())
}

/// Commandes à arguments : modes, dates, conversions.
fn commande_etendue(session: &mut Session, entree: &str) -> Option<Affichage> {
    let mots: Vec<&str> = entree[1..].split_whitespace().collect();

    match mots.as_slice() {
        [mode] => {
            if let Some(m) = ModeAngle::depuis_nom(mode) {
                return Some(session.regler_mode_angle(m));
            }
            if let Some(b) = ModeBase::depuis_nom(mode) {
                return Some(session.regler_mode_base(b));
            }
            None
        }

        ["date", d1, d2] => Some(session.ecart_dates(d1, d2)),

        ["conv", valeur, de, vers, categorie] => {
            let v = valeur.parse::<f64>().ok()?;
            Some(session.convertir(v, de, vers, categorie))
        }

        _ => None,
    }
}

/// Une ligne d'expression : chaque caractère non blanc est un jeton ;
/// un `=` final évalue.
fn saisir_ligne(session: &mut Session, entree: &str) -> Affichage {
    let evaluer = entree.ends_with('=');
    let corps = entree.strip_suffix('=').unwrap_or(entree);

    let mut tampon = [0u8; 4];
    for c in corps.chars().filter(|c| !c.is_whitespace()) {
        session.jeton(c.encode_utf8(&mut tampon));
    }

    if evaluer {
        session.evaluer()
    } else {
        session.affichage()
    }
}

fn afficher(sortie: &mut impl Write, session: &Session, a: &Affichage) -> io::Result<()> {
    let temoin = if a.temoin_memoire { "  M" } else { "" };
    writeln!(
        sortie,
        "[{} | {}]{}",
        session.mode_angle().nom(),
        session.mode_base().nom(),
        temoin
    )?;

    if !a.expression.is_empty() {
        writeln!(sortie, "  {}", a.expression)?;
    }
    writeln!(sortie, "  {}", a.principal)
}

fn historique(sortie: &mut impl Write, session: &Session, n: usize) -> io::Result<()> {
    if session.historique().taille() == 0 {
        return writeln!(sortie, "(historique vide)");
    }
    for e in session.historique().recentes(n) {
        writeln!(sortie, "  {} = {}", e.expression, e.resultat)?;
    }
    Ok(())
}

fn aide(sortie: &mut impl Write) -> io::Result<()> {
    writeln!(sortie, "expression : 2+3*4=   sin(30)=   (2+3   AF&F0= (en base hex)")?;
    writeln!(sortie, "modes      : :deg :rad :grad   :dec :hex :oct :bin")?;
    writeln!(sortie, "édition    : :c  :ce  :bs  :neg  :inv  :fact")?;
    writeln!(sortie, "mémoire    : :mc :mr :m+ :m- :ms")?;
    writeln!(sortie, "annexes    : :hist   :date AAAA-MM-JJ AAAA-MM-JJ")?;
    writeln!(
        sortie,
        "             :conv VALEUR DE VERS CATEGORIE (length, weight, temperature, volume)"
    )
}
