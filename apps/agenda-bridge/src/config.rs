//! Configuração do micro-serviço de integração
//!
//! Este módulo resolve o diretório de dados e os caminhos dos arquivos do
//! protocolo trocado com a interface da clínica

use std::path::PathBuf;

/// Configuração do adaptador de comandos
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Diretório dos arquivos de protocolo trocados com a interface
    pub data_dir: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("DataFiles"),
        }
    }
}

impl BridgeConfig {
    /// Monta a configuração com os padrões e sobrescritas do ambiente
    ///
    /// `CLINIC_DATA_DIR` substitui o diretório de dados padrão.
    pub fn from_env() -> Self {
        match std::env::var("CLINIC_DATA_DIR") {
            Ok(dir) if !dir.is_empty() => Self::with_data_dir(dir),
            _ => Self::default(),
        }
    }

    /// Cria uma configuração apontando para o diretório informado
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    /// Arquivo de comando lido a cada invocação
    pub fn command_file(&self) -> PathBuf {
        self.data_dir.join("schedule_command.txt")
    }

    /// Entrada do comando SCHEDULE_APPOINTMENT
    pub fn schedule_input(&self) -> PathBuf {
        self.data_dir.join("schedule_input.txt")
    }

    /// Saída do comando SCHEDULE_APPOINTMENT
    pub fn schedule_output(&self) -> PathBuf {
        self.data_dir.join("schedule_output.txt")
    }

    /// Entrada do comando GET_AVAILABLE_SLOTS
    pub fn slots_query(&self) -> PathBuf {
        self.data_dir.join("slots_query.txt")
    }

    /// Saída do comando GET_AVAILABLE_SLOTS
    pub fn available_slots_output(&self) -> PathBuf {
        self.data_dir.join("available_slots.txt")
    }

    /// Armazenamento durável do registro de consultas
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir.join("appointments.txt")
    }

    /// Destino da exportação de GET_ALL_APPOINTMENTS
    pub fn export_file(&self) -> PathBuf {
        self.data_dir.join("all_appointments.txt")
    }
}
