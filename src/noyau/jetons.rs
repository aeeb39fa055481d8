// src/noyau/jetons.rs

use super::modes::ModeBase;

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    Pi,
    Euler,

    // Identifiants (le parse RPN décide si c'est une fonction connue
    // ou un identifiant hors grammaire).
    Ident(String),

    Plus,
    Moins,
    Etoile,
    Barre,
    Pourcent,
    Puissance, // **

    EtBin,  // &
    OuBin,  // |
    OuExcl, // ^
    NonBin, // ~
    DecalG, // <<
    DecalD, // >>

    ParG,
    ParD,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - littéraux numériques interprétés dans la base active
///   (Dec: décimaux avec fraction ; Hex: 0-9 A-F ; Oct: 0-7 ; Bin: 0-1)
/// - opérateurs + - * / % ** & | ^ ~ << >>
/// - parenthèses ( )
/// - π ou pi, constante e
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str, base: ModeBase) -> Result<Vec<Jeton>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Jeton::ParG);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::ParD);
            i += 1;
            continue;
        }

        // Opérateurs (lookahead pour ** << >>)
        match c {
            '+' => {
                out.push(Jeton::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Jeton::Moins);
                i += 1;
                continue;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Jeton::Puissance);
                    i += 2;
                } else {
                    out.push(Jeton::Etoile);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Jeton::Barre);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Jeton::Pourcent);
                i += 1;
                continue;
            }
            '&' => {
                out.push(Jeton::EtBin);
                i += 1;
                continue;
            }
            '|' => {
                out.push(Jeton::OuBin);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Jeton::OuExcl);
                i += 1;
                continue;
            }
            '~' => {
                out.push(Jeton::NonBin);
                i += 1;
                continue;
            }
            '<' => {
                if i + 1 < chars.len() && chars[i + 1] == '<' {
                    out.push(Jeton::DecalG);
                    i += 2;
                    continue;
                }
                return Err("'<' isolé (décalage attendu: <<)".into());
            }
            '>' => {
                if i + 1 < chars.len() && chars[i + 1] == '>' {
                    out.push(Jeton::DecalD);
                    i += 2;
                    continue;
                }
                return Err("'>' isolé (décalage attendu: >>)".into());
            }
            _ => {}
        }

        // π : "π" (le mot "pi" passe par la voie identifiant)
        if c == 'π' {
            out.push(Jeton::Pi);
            i += 1;
            continue;
        }

        // Littéral numérique dans la base active.
        // NOTE Hex: les chiffres A-F sont MAJUSCULES (la saisie les produit
        // ainsi) ; les minuscules restent des identifiants (e, sin, ...).
        if debut_nombre(c, base) {
            let start = i;
            i += 1;
            while i < chars.len() && corps_nombre(chars[i], base) {
                i += 1;
            }
            let brut: String = chars[start..i].iter().collect();
            let v = lire_nombre(&brut, base)?;
            out.push(Jeton::Nombre(v));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            let m = mot.to_lowercase();

            match m.as_str() {
                "pi" => out.push(Jeton::Pi),
                "e" => out.push(Jeton::Euler),
                _ => out.push(Jeton::Ident(m)),
            }
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Premier caractère possible d'un littéral dans la base donnée.
fn debut_nombre(c: char, base: ModeBase) -> bool {
    match base {
        ModeBase::Dec => c.is_ascii_digit() || c == '.',
        ModeBase::Hex => c.is_ascii_digit() || ('A'..='F').contains(&c),
        ModeBase::Oct | ModeBase::Bin => c.is_ascii_digit(),
    }
}

/// Caractère de continuation d'un littéral dans la base donnée.
/// On scanne large (tous les chiffres décimaux) : la lecture signale
/// ensuite un chiffre hors base ("8" en octal, "2" en binaire).
fn corps_nombre(c: char, base: ModeBase) -> bool {
    match base {
        ModeBase::Dec => c.is_ascii_digit() || c == '.',
        ModeBase::Hex => c.is_ascii_digit() || ('A'..='F').contains(&c),
        ModeBase::Oct | ModeBase::Bin => c.is_ascii_digit(),
    }
}

fn lire_nombre(brut: &str, base: ModeBase) -> Result<f64, String> {
    match base {
        ModeBase::Dec => brut
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("nombre invalide: '{brut}'")),
        ModeBase::Hex => lire_entier(brut, 16),
        ModeBase::Oct => lire_entier(brut, 8),
        ModeBase::Bin => lire_entier(brut, 2),
    }
}

fn lire_entier(brut: &str, radix: u32) -> Result<f64, String> {
    i64::from_str_radix(brut, radix)
        .map(|n| n as f64)
        .map_err(|_| format!("littéral invalide en base {radix}: '{brut}'"))
}

/// Format utilitaire (journal de debug) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match j {
            Jeton::Nombre(v) => format!("{v}"),
            Jeton::Pi => "π".to_string(),
            Jeton::Euler => "e".to_string(),
            Jeton::Ident(nom) => nom.clone(),

            Jeton::Plus => "+".to_string(),
            Jeton::Moins => "-".to_string(),
            Jeton::Etoile => "*".to_string(),
            Jeton::Barre => "/".to_string(),
            Jeton::Pourcent => "%".to_string(),
            Jeton::Puissance => "**".to_string(),

            Jeton::EtBin => "&".to_string(),
            Jeton::OuBin => "|".to_string(),
            Jeton::OuExcl => "^".to_string(),
            Jeton::NonBin => "~".to_string(),
            Jeton::DecalG => "<<".to_string(),
            Jeton::DecalD => ">>".to_string(),

            Jeton::ParG => "(".to_string(),
            Jeton::ParD => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
