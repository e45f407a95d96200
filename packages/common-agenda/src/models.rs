//! Modelos de dados compartilhados do núcleo de agendamento
//!
//! Este módulo define as estruturas de dados principais usadas pelo
//! ecossistema de agendamento da clínica

use serde::{Deserialize, Serialize};

use crate::error::AgendaError;

/// Status possíveis de um agendamento
///
/// O núcleo só produz consultas agendadas; cancelamento e conclusão são
/// responsabilidade de outros módulos do ecossistema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Consulta agendada
    Scheduled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "SCHEDULED"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            _ => Err(AgendaError::InvalidStatus(s.to_string())),
        }
    }
}

/// Representa uma consulta agendada
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Identificador único da consulta, atribuído sequencialmente
    pub id: i64,
    /// Identificador do paciente (entidade mantida pelo colaborador externo)
    pub patient_id: i64,
    /// Identificador do médico (entidade mantida pelo colaborador externo)
    pub doctor_id: i64,
    /// Data da consulta, token opaco comparado apenas por igualdade
    pub date: String,
    /// Janela de atendimento (token da grade diária)
    pub slot: String,
    /// Status atual da consulta
    pub status: AppointmentStatus,
}

/// Entrada efêmera da grade de horários de uma data
///
/// Derivada do registro de consultas na inicialização da grade; `available`
/// só transita de livre para ocupado dentro de uma execução, nunca o
/// contrário. Não é persistida.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotEntry {
    /// Janela de atendimento (token da grade diária)
    pub time: String,
    /// Indica se a janela segue livre nesta execução
    pub available: bool,
    /// Médico dono da janela consultada
    pub doctor_id: i64,
}
