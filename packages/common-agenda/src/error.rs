//! Definições de erro para a biblioteca common-agenda
//!
//! Este módulo define os tipos de erro usados pela biblioteca

use thiserror::Error;

/// Erros específicos para operações do núcleo de agendamento
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Erro de E/S no armazenamento de consultas: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registro malformado na linha {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Status de agendamento inválido: {0}")]
    InvalidStatus(String),

    #[error("Horário fora da grade diária: {0}")]
    InvalidSlot(String),

    #[error("Conflito de agendamento: médico {doctor_id} já possui consulta em {date} {slot}")]
    DuplicateBooking {
        doctor_id: i64,
        date: String,
        slot: String,
    },
}
