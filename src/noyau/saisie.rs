// src/noyau/saisie.rs
//
// Tampon de saisie (expression en cours)
// --------------------------------------
// Un seul tampon texte, muté uniquement par les opérations ci-dessous.
// Aucune validation sémantique ici : la syntaxe illégale est laissée à
// l'évaluation. Deux garde-fous seulement :
// - sentinelle "0" / état d'erreur => l'ajout repart d'un tampon vide ;
// - une fermante n'est acceptée que s'il reste une ouvrante non fermée
//   (le compte de parenthèses ne descend jamais sous zéro).

/// Longueur maximale de la projection avant troncature (affichage principal).
const LARGEUR_PRINCIPAL: usize = 15;

#[derive(Clone, Debug, Default)]
pub struct Saisie {
    brute: String,
    en_erreur: bool,
}

impl Saisie {
    /// Tampon brut, tel qu'il sera évalué.
    pub fn brute(&self) -> &str {
        &self.brute
    }

    pub fn en_erreur(&self) -> bool {
        self.en_erreur
    }

    pub fn est_vide(&self) -> bool {
        self.brute.is_empty()
    }

    /// Ajoute un fragment pré-rendu (chiffre, opérateur, `sin(`, constante...).
    pub fn ajouter(&mut self, jeton: &str) {
        if self.en_erreur || self.brute == "0" {
            self.brute.clear();
            self.en_erreur = false;
        }

        // garde-fou parenthèses : pas de fermante sans ouvrante en attente
        if jeton == ")" {
            let ouvertes = self.brute.chars().filter(|&c| c == '(').count();
            let fermees = self.brute.chars().filter(|&c| c == ')').count();
            if fermees >= ouvertes {
                return;
            }
        }

        self.brute.push_str(jeton);
    }

    /// Retire exactement le dernier caractère ; sans effet sur tampon vide.
    pub fn retour_arriere(&mut self) {
        self.brute.pop();
    }

    /// C : remise à zéro complète (tampon + drapeau d'erreur).
    pub fn effacer(&mut self) {
        self.brute.clear();
        self.en_erreur = false;
    }

    /// CE : identique à C dans ce modèle à tampon unique.
    pub fn effacer_entree(&mut self) {
        self.effacer();
    }

    /// Remplace le tampon entier (résultat d'évaluation, rappel mémoire).
    pub fn remplacer(&mut self, texte: &str) {
        self.brute.clear();
        self.brute.push_str(texte);
        self.en_erreur = false;
    }

    /// Marque l'état d'erreur : le prochain ajout repartira à vide.
    pub fn marquer_erreur(&mut self) {
        self.brute.clear();
        self.en_erreur = true;
    }

    /// Projection d'affichage complète : opérateurs symboliques (×, ÷, −)
    /// et constantes (π).
    pub fn projection(&self) -> String {
        self.brute
            .replace('*', "×")
            .replace('/', "÷")
            .replace('-', "−")
            .replace("pi", "π")
    }

    /// Projection tronquée aux 15 derniers caractères (marqueur `...`),
    /// sentinelle "0" sur tampon vide.
    pub fn projection_principale(&self) -> String {
        let p = self.projection();
        if p.is_empty() {
            return "0".to_string();
        }

        let total = p.chars().count();
        if total <= LARGEUR_PRINCIPAL {
            return p;
        }

        let queue: String = p.chars().skip(total - LARGEUR_PRINCIPAL).collect();
        format!("...{queue}")
    }
}
