/**
 * FORMULES - Table de dispatch des calculs électriques
 *
 * RÔLE :
 * Chaque variante de `Formula` correspond à une route POST /Calcular*.
 * Elle porte son chemin, sa précondition, son calcul et son message.
 *
 * FONCTIONNEMENT :
 * - `check` : précondition propre à la formule (→ InvalidDomain)
 * - `apply` : calcule la grandeur et l'écrit dans UN seul champ du record
 * - `message` : phrase lisible, résultat arrondi à 2 décimales
 *
 * L'ordre des multiplications suit les formules telles qu'écrites
 * (I·I·R·t, (V·V·t)/R, ρ·(L/A)) pour des résultats identiques au bit près.
 */

use crate::error::CalcError;
use crate::models::{ElectricalQuantities, Resposta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formula {
    Tensao,
    Corrente,
    Resistencia,
    Resistividade,
    Energia,
    EnergiaVIT,
    EnergiaCRT,
    EnergiaVRT,
    PotenciaVI,
    PotenciaIR,
    PotenciaVR,
}

impl Formula {
    pub const ALL: [Formula; 11] = [
        Formula::Tensao,
        Formula::Corrente,
        Formula::Resistencia,
        Formula::Resistividade,
        Formula::Energia,
        Formula::EnergiaVIT,
        Formula::EnergiaCRT,
        Formula::EnergiaVRT,
        Formula::PotenciaVI,
        Formula::PotenciaIR,
        Formula::PotenciaVR,
    ];

    /// Nom de l'endpoint, ex: "CalcularTensao"
    pub fn name(self) -> &'static str {
        match self {
            Formula::Tensao => "CalcularTensao",
            Formula::Corrente => "CalcularCorrente",
            Formula::Resistencia => "CalcularResistencia",
            Formula::Resistividade => "CalcularResistividade",
            Formula::Energia => "CalcularEnergia",
            Formula::EnergiaVIT => "CalcularEnergiaVIT",
            Formula::EnergiaCRT => "CalcularEnergiaCRT",
            Formula::EnergiaVRT => "CalcularEnergiaVRT",
            Formula::PotenciaVI => "CalcularPotenciaVI",
            Formula::PotenciaIR => "CalcularPotenciaIR",
            Formula::PotenciaVR => "CalcularPotenciaVR",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Formula::Tensao => "/CalcularTensao",
            Formula::Corrente => "/CalcularCorrente",
            Formula::Resistencia => "/CalcularResistencia",
            Formula::Resistividade => "/CalcularResistividade",
            Formula::Energia => "/CalcularEnergia",
            Formula::EnergiaVIT => "/CalcularEnergiaVIT",
            Formula::EnergiaCRT => "/CalcularEnergiaCRT",
            Formula::EnergiaVRT => "/CalcularEnergiaVRT",
            Formula::PotenciaVI => "/CalcularPotenciaVI",
            Formula::PotenciaIR => "/CalcularPotenciaIR",
            Formula::PotenciaVR => "/CalcularPotenciaVR",
        }
    }

    /// Champ JSON de `ElectricalQuantities` écrit par la formule.
    pub fn output_field(self) -> &'static str {
        match self {
            Formula::Tensao => "tensao",
            Formula::Corrente => "corrente",
            Formula::Resistencia => "resistencia",
            Formula::Resistividade => "resistencia_eletrica",
            Formula::Energia => "energia_pt",
            Formula::EnergiaVIT => "energia_vit",
            Formula::EnergiaCRT => "energia_crt",
            Formula::EnergiaVRT => "energia_vrt",
            Formula::PotenciaVI => "potencia_vi",
            Formula::PotenciaIR => "potencia_ir",
            Formula::PotenciaVR => "potencia_vr",
        }
    }

    /// Vérifie la précondition de la formule sur les grandeurs décodées.
    pub fn check(self, q: &ElectricalQuantities) -> Result<(), CalcError> {
        match self {
            Formula::Tensao if q.resistencia == 0.0 => Err(CalcError::InvalidDomain(
                "Resistência não pode ser zero para calcular a tensão",
            )),
            Formula::Corrente if q.resistencia == 0.0 => Err(CalcError::InvalidDomain(
                "Resistência não pode ser zero para calcular a corrente",
            )),
            Formula::Resistencia if q.corrente == 0.0 => Err(CalcError::InvalidDomain(
                "Corrente não pode ser zero para calcular a resistência",
            )),
            Formula::Resistividade
                if q.resistividade <= 0.0 || q.comprimento <= 0.0 || q.area <= 0.0 =>
            {
                Err(CalcError::InvalidDomain(
                    "Os valores de resistividade, comprimento e área devem ser maiores que zero.",
                ))
            }
            // EnergiaVRT : division par R non gardée, R = 0 donne inf/NaN
            _ => Ok(()),
        }
    }

    /// Vérifie, calcule et écrit le résultat dans le champ de sortie.
    /// Retourne la valeur calculée.
    pub fn apply(self, q: &mut ElectricalQuantities) -> Result<f64, CalcError> {
        self.check(q)?;
        let value = match self {
            Formula::Tensao => {
                q.tensao = tensao(q.corrente, q.resistencia);
                q.tensao
            }
            Formula::Corrente => {
                q.corrente = corrente(q.tensao, q.resistencia);
                q.corrente
            }
            Formula::Resistencia => {
                q.resistencia = resistencia(q.tensao, q.corrente);
                q.resistencia
            }
            Formula::Resistividade => {
                q.resistencia_eletrica = resistencia_eletrica(q.resistividade, q.comprimento, q.area);
                q.resistencia_eletrica
            }
            Formula::Energia => {
                q.energia_pt = energia_pt(q.potencia, q.tempo);
                q.energia_pt
            }
            Formula::EnergiaVIT => {
                q.energia_vit = energia_vit(q.tensao, q.corrente, q.tempo);
                q.energia_vit
            }
            Formula::EnergiaCRT => {
                q.energia_crt = energia_crt(q.corrente, q.resistencia, q.tempo);
                q.energia_crt
            }
            Formula::EnergiaVRT => {
                q.energia_vrt = energia_vrt(q.tensao, q.resistencia, q.tempo);
                q.energia_vrt
            }
            Formula::PotenciaVI => {
                q.potencia_vi = potencia_vi(q.tensao, q.corrente);
                q.potencia_vi
            }
            Formula::PotenciaIR => {
                q.potencia_ir = potencia_i2r(q.corrente, q.resistencia);
                q.potencia_ir
            }
            Formula::PotenciaVR => {
                q.potencia_vr = potencia_i2r(q.corrente, q.resistencia);
                q.potencia_vr
            }
        };
        Ok(value)
    }

    pub fn message(self, value: f64) -> String {
        match self {
            Formula::Tensao => format!("A tensão é {value:.2} volts"),
            Formula::Corrente => format!("A corrente é {value:.2} amperes"),
            Formula::Resistencia => format!("A resistência é {value:.2} ohms"),
            Formula::Resistividade => format!("A resistência elétrica é {value:.2}"),
            Formula::Energia => format!("A energia elétrica é {value:.2}"),
            Formula::EnergiaVIT => format!("A energia usando tensão, corrente e tempo é {value:.2}"),
            Formula::EnergiaCRT => {
                format!("A energia usando corrente, resistência e tempo é {value:.2}")
            }
            Formula::EnergiaVRT => {
                format!("A energia usando tensão, resistência e tempo é {value:.2}")
            }
            Formula::PotenciaVI => {
                format!("A potência usando tensão e corrente é {value:.2} watts")
            }
            Formula::PotenciaIR => {
                format!("A potência usando corrente e resistência é {value:.2} watts")
            }
            Formula::PotenciaVR => {
                format!("A potência usando corrente ao quadrado e resistência é {value:.2} watts")
            }
        }
    }

    /// Calcul complet sur un record propre à la requête.
    pub fn evaluate(self, q: &mut ElectricalQuantities) -> Result<(f64, Resposta), CalcError> {
        let value = self.apply(q)?;
        Ok((value, Resposta { resposta: self.message(value) }))
    }
}

// V = I·R
pub fn tensao(corrente: f64, resistencia: f64) -> f64 {
    corrente * resistencia
}

// I = V/R
pub fn corrente(tensao: f64, resistencia: f64) -> f64 {
    tensao / resistencia
}

// R = V/I
pub fn resistencia(tensao: f64, corrente: f64) -> f64 {
    tensao / corrente
}

// R = ρ·(L/A)
pub fn resistencia_eletrica(resistividade: f64, comprimento: f64, area: f64) -> f64 {
    resistividade * (comprimento / area)
}

// E = P·t
pub fn energia_pt(potencia: f64, tempo: f64) -> f64 {
    potencia * tempo
}

// E = V·I·t
pub fn energia_vit(tensao: f64, corrente: f64, tempo: f64) -> f64 {
    tensao * corrente * tempo
}

// E = I²·R·t
pub fn energia_crt(corrente: f64, resistencia: f64, tempo: f64) -> f64 {
    corrente * corrente * resistencia * tempo
}

// E = V²·t/R
pub fn energia_vrt(tensao: f64, resistencia: f64, tempo: f64) -> f64 {
    (tensao * tensao * tempo) / resistencia
}

// P = V·I
pub fn potencia_vi(tensao: f64, corrente: f64) -> f64 {
    tensao * corrente
}

/// P = I²·R, partagée par CalcularPotenciaIR et CalcularPotenciaVR.
pub fn potencia_i2r(corrente: f64, resistencia: f64) -> f64 {
    corrente * corrente * resistencia
}
