// src/noyau/unites.rs
//
// Conversion d'unités
// -------------------
// Chaque catégorie linéaire (longueur, poids, volume) a une unité de base
// canonique et une table unité -> facteur vers la base ; la conversion est
// valeur * facteur[de] / facteur[vers]. La température n'est PAS linéaire
// (décalages d'origine) : transformée affine dédiée, jamais la table.

use super::erreurs::ErreurCalcul;
use super::format::{formater_significatif, formater_valeur};

/// Chiffres significatifs de la valeur convertie à l'affichage.
const CHIFFRES_CONVERSION: i32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Categorie {
    Longueur,
    Poids,
    Temperature,
    Volume,
}

impl Categorie {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom.to_ascii_lowercase().as_str() {
            "length" | "longueur" => Some(Categorie::Longueur),
            "weight" | "poids" => Some(Categorie::Poids),
            "temperature" => Some(Categorie::Temperature),
            "volume" => Some(Categorie::Volume),
            _ => None,
        }
    }
}

/// Table unité -> facteur vers l'unité de base de la catégorie.
pub type TableFacteurs = [(&'static str, f64)];

/// Base: mètre.
pub const LONGUEURS: &TableFacteurs = &[
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("centimeter", 0.01),
    ("millimeter", 0.001),
    ("inch", 0.0254),
    ("foot", 0.3048),
    ("yard", 0.9144),
    ("mile", 1609.344),
];

/// Base: kilogramme.
pub const POIDS: &TableFacteurs = &[
    ("kilogram", 1.0),
    ("gram", 0.001),
    ("milligram", 1e-6),
    ("tonne", 1000.0),
    ("pound", 0.453_592_37),
    ("ounce", 0.028_349_523_125),
];

/// Base: litre.
pub const VOLUMES: &TableFacteurs = &[
    ("liter", 1.0),
    ("milliliter", 0.001),
    ("gallon", 3.785_411_784),
    ("quart", 0.946_352_946),
    ("pint", 0.473_176_473),
    ("cup", 0.236_588_236_5),
];

/// Conversion par table multiplicative (catégories linéaires).
pub fn convertir_table(
    valeur: f64,
    de: &str,
    vers: &str,
    table: &TableFacteurs,
) -> Result<f64, ErreurCalcul> {
    let f_de = facteur(table, de)?;
    let f_vers = facteur(table, vers)?;
    Ok(valeur * f_de / f_vers)
}

fn facteur(table: &TableFacteurs, unite: &str) -> Result<f64, ErreurCalcul> {
    table
        .iter()
        .find(|(nom, _)| *nom == unite)
        .map(|(_, f)| *f)
        .ok_or(ErreurCalcul::ConversionIndisponible)
}

/// Température : transformée affine par unité, pivot Celsius.
fn convertir_temperature(valeur: f64, de: &str, vers: &str) -> Result<f64, ErreurCalcul> {
    let celsius = match de {
        "celsius" => valeur,
        "fahrenheit" => (valeur - 32.0) * 5.0 / 9.0,
        "kelvin" => valeur - 273.15,
        _ => return Err(ErreurCalcul::ConversionIndisponible),
    };

    match vers {
        "celsius" => Ok(celsius),
        "fahrenheit" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "kelvin" => Ok(celsius + 273.15),
        _ => Err(ErreurCalcul::ConversionIndisponible),
    }
}

/// Conversion dans une catégorie donnée.
pub fn convertir(
    valeur: f64,
    de: &str,
    vers: &str,
    categorie: Categorie,
) -> Result<f64, ErreurCalcul> {
    match categorie {
        Categorie::Longueur => convertir_table(valeur, de, vers, LONGUEURS),
        Categorie::Poids => convertir_table(valeur, de, vers, POIDS),
        Categorie::Volume => convertir_table(valeur, de, vers, VOLUMES),
        Categorie::Temperature => convertir_temperature(valeur, de, vers),
    }
}

/// Phrase d'affichage : « 1 kilometer = 1000 meter ».
pub fn format_conversion(valeur: f64, de: &str, vers: &str, resultat: f64) -> String {
    format!(
        "{} {de} = {} {vers}",
        formater_valeur(valeur),
        formater_significatif(resultat, CHIFFRES_CONVERSION)
    )
}
