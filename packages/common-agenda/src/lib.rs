//! Common Agenda - Biblioteca compartilhada do núcleo de agendamento de consultas
//!
//! Esta biblioteca fornece:
//! - Modelos de dados compartilhados
//! - Registro durável de consultas e arbitragem de conflitos de agendamento
//! - Grade de horários diários por médico e data
//! - Persistência em arquivo texto orientado a linhas

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub mod calendar;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;

/// Abre o registro de consultas a partir do caminho informado
///
/// Armazenamento ausente resulta em registro vazio; o diretório pai é criado
/// caso ainda não exista, para que a primeira persistência encontre o destino
/// pronto.
pub fn open_ledger(path: &Path) -> Result<ledger::AppointmentLedger> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .context("Falha ao criar diretório para o armazenamento de consultas")?;
        }
    }

    let ledger = store::restore(path).with_context(|| {
        format!(
            "Falha ao restaurar o registro de consultas de {}",
            path.display()
        )
    })?;

    info!(
        "Registro de consultas carregado de {}: {} consultas",
        path.display(),
        ledger.len()
    );
    Ok(ledger)
}
