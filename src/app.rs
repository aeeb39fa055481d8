// src/app.rs
//
// Calculatrice multi-modes — module App (racine)
// ----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter Session (pour main.rs: use crate::app::Session;)
//
// Important:
// - etat.rs porte la session de calcul et ne rend rien ;
// - vue.rs est la couche de rendu (terminal) et ne calcule rien.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::Session;`
pub use etat::Session;
