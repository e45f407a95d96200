//! Persistência do registro de consultas
//!
//! Formato de linha: `id,patientId,doctorId,date,slot,status`, texto UTF-8
//! delimitado por quebras de linha, sem cabeçalho e sem escape de vírgulas
//! (vírgula dentro de data ou horário não é suportada e aparece como erro de
//! contagem de campos).

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::calendar;
use crate::error::AgendaError;
use crate::ledger::AppointmentLedger;
use crate::models::{Appointment, AppointmentStatus};

/// Número de campos de um registro serializado
const RECORD_FIELDS: usize = 6;

/// Serializa uma consulta como uma linha do armazenamento
fn format_record(appointment: &Appointment) -> String {
    format!(
        "{},{},{},{},{},{}",
        appointment.id,
        appointment.patient_id,
        appointment.doctor_id,
        appointment.date,
        appointment.slot,
        appointment.status,
    )
}

/// Interpreta uma linha do armazenamento; `line_number` começa em 1
fn parse_record(line: &str, line_number: usize) -> Result<Appointment, AgendaError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != RECORD_FIELDS {
        return Err(AgendaError::MalformedRecord {
            line: line_number,
            reason: format!(
                "esperados {} campos, encontrados {}",
                RECORD_FIELDS,
                fields.len()
            ),
        });
    }

    let parse_id = |field: &str, name: &str| -> Result<i64, AgendaError> {
        field
            .trim()
            .parse::<i64>()
            .map_err(|_| AgendaError::MalformedRecord {
                line: line_number,
                reason: format!("campo {} não numérico: {:?}", name, field),
            })
    };

    let id = parse_id(fields[0], "id")?;
    let patient_id = parse_id(fields[1], "patientId")?;
    let doctor_id = parse_id(fields[2], "doctorId")?;
    let date = fields[3].trim().to_string();
    let slot = fields[4].trim().to_string();

    calendar::validate_slot(&slot).map_err(|err| AgendaError::MalformedRecord {
        line: line_number,
        reason: err.to_string(),
    })?;

    let status = fields[5]
        .trim()
        .parse::<AppointmentStatus>()
        .map_err(|err| AgendaError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;

    Ok(Appointment {
        id,
        patient_id,
        doctor_id,
        date,
        slot,
        status,
    })
}

/// Restaura o registro de consultas do caminho informado
///
/// Armazenamento ausente é tratado como registro vazio, não como erro.
/// Qualquer linha malformada invalida a carga inteira: o processo nunca age
/// sobre dados parcialmente interpretados.
pub fn restore(path: &Path) -> Result<AppointmentLedger, AgendaError> {
    if !path.exists() {
        info!(
            "Armazenamento ausente em {}, iniciando registro vazio",
            path.display()
        );
        return Ok(AppointmentLedger::new());
    }

    let contents = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        records.push(parse_record(line, i + 1)?);
    }

    debug!(
        "{} consultas restauradas de {}",
        records.len(),
        path.display()
    );
    AppointmentLedger::from_records(records)
}

/// Persiste o registro completo no caminho informado
///
/// Grava em arquivo temporário no mesmo diretório e renomeia de forma
/// atômica sobre o destino; o arquivo é sempre sobrescrito por inteiro,
/// nunca anexado. Não há trava entre processos: a implantação é de escritor
/// único.
pub fn persist(ledger: &AppointmentLedger, path: &Path) -> Result<(), AgendaError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    for appointment in ledger.iter() {
        writeln!(tmp, "{}", format_record(appointment))?;
    }
    tmp.flush()?;
    tmp.persist(path).map_err(|err| AgendaError::Io(err.error))?;

    debug!(
        "{} consultas persistidas em {}",
        ledger.len(),
        path.display()
    );
    Ok(())
}
