use serde::{Deserialize, Serialize};

/// Grandezas électriques échangées avec l'API (unités SI par convention).
///
/// Tous les champs sont optionnels en entrée (0 par défaut) et les champs
/// inconnus sont ignorés. Un enregistrement vit le temps d'une requête :
/// décodé, muté une fois par la formule, puis jeté.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalQuantities {
    pub resistencia: f64,          // ohms
    pub corrente: f64,             // amperes
    pub tensao: f64,               // volts
    pub potencia_vi: f64,          // watts, V·I
    pub tempo: f64,                // secondes
    pub energia_pt: f64,           // joules, P·t
    pub resistividade: f64,        // ohm·mètres
    pub comprimento: f64,          // mètres
    pub area: f64,                 // mètres carrés
    pub resistencia_eletrica: f64, // ohms, ρ·L/A
    pub potencia_ir: f64,          // watts, I²·R
    pub energia_vit: f64,          // joules, V·I·t
    pub energia_crt: f64,          // joules, I²·R·t
    pub energia_vrt: f64,          // joules, V²·t/R
    pub potencia: f64,             // watts
    pub potencia_vr: f64,          // watts, I²·R (second nom)
}

/// Corps de réponse d'un calcul réussi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resposta {
    pub resposta: String,
}
