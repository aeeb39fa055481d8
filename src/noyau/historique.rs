// src/noyau/historique.rs
//
// Journal borné des calculs réussis
// ---------------------------------
// FIFO à capacité fixe (50) : au-delà, la plus ancienne entrée part.
// Pas d'API de suppression, pas de persistance ; lecture = les N plus
// récentes, de la plus récente à la plus ancienne.

use std::collections::VecDeque;

/// Capacité du journal : taille clampée en permanence.
pub const CAPACITE: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entree {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: VecDeque<Entree>,
}

impl Historique {
    pub fn enregistrer(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        self.entrees.push_back(Entree {
            expression: expression.into(),
            resultat: resultat.into(),
        });
        while self.entrees.len() > CAPACITE {
            self.entrees.pop_front();
        }
    }

    pub fn taille(&self) -> usize {
        self.entrees.len()
    }

    /// Les n entrées les plus récentes, la plus récente d'abord.
    pub fn recentes(&self, n: usize) -> impl Iterator<Item = &Entree> {
        self.entrees.iter().rev().take(n)
    }

    /// La plus ancienne entrée encore présente (tests d'éviction).
    pub fn plus_ancienne(&self) -> Option<&Entree> {
        self.entrees.front()
    }
}
