//! Agenda Bridge - Micro-serviço de integração entre a interface da clínica
//! e o núcleo de agendamento
//!
//! Cada invocação processa exatamente um comando lido do diretório de
//! protocolo e termina; não há laço de serviço, socket nem camada RPC. A
//! interface gráfica dispara o processo e lê os arquivos de saída.

use anyhow::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Inicializa o assinante de logs
///
/// `RUST_LOG` controla o filtro; `BRIDGE_LOG_JSON=1` seleciona saída JSON
/// estruturada para coleta pelos demais módulos do ecossistema.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("BRIDGE_LOG_JSON").map(|v| v == "1").unwrap_or(false);
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = config::BridgeConfig::from_env();
    if let Err(err) = commands::run(&config) {
        error!("Execução abortada: {:#}", err);
        return Err(err);
    }

    Ok(())
}
