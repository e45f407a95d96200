//! Protocolo de comandos trocado com a interface da clínica
//!
//! Cada execução processa exatamente um comando: carrega o registro de
//! consultas, despacha, grava os arquivos de saída e persiste quando houver
//! mutação. Não há sessão entre invocações.

use std::fs;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use common_agenda::calendar::{self, SlotCalendar};
use common_agenda::ledger::AppointmentLedger;
use common_agenda::store;

use crate::config::BridgeConfig;

/// Resposta de conflito do comando SCHEDULE_APPOINTMENT
const SLOT_NOT_AVAILABLE: &str = "ERROR: Slot not available\n";

/// Comandos aceitos pelo adaptador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ScheduleAppointment,
    GetAvailableSlots,
    GetAllAppointments,
}

impl Command {
    /// Interpreta o token do arquivo de comando
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "SCHEDULE_APPOINTMENT" => Some(Command::ScheduleAppointment),
            "GET_AVAILABLE_SLOTS" => Some(Command::GetAvailableSlots),
            "GET_ALL_APPOINTMENTS" => Some(Command::GetAllAppointments),
            _ => None,
        }
    }
}

/// Pedido de agendamento lido do arquivo de entrada
#[derive(Debug)]
struct ScheduleRequest {
    patient_id: i64,
    doctor_id: i64,
    date: String,
    slot: String,
}

/// Interpreta a linha `patientId,doctorId,date,slot`
fn parse_schedule_request(line: &str) -> Result<ScheduleRequest> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 4 {
        bail!(
            "pedido de agendamento malformado: esperados 4 campos, encontrados {}",
            fields.len()
        );
    }

    let patient_id = fields[0]
        .trim()
        .parse::<i64>()
        .context("campo patientId não numérico no pedido de agendamento")?;
    let doctor_id = fields[1]
        .trim()
        .parse::<i64>()
        .context("campo doctorId não numérico no pedido de agendamento")?;
    let date = fields[2].trim().to_string();
    let slot = fields[3].trim().to_string();

    calendar::validate_slot(&slot)?;

    Ok(ScheduleRequest {
        patient_id,
        doctor_id,
        date,
        slot,
    })
}

/// Executa uma invocação completa: carregar, despachar, persistir, sair
///
/// Token de comando desconhecido ou vazio é registrado e ignorado; a
/// execução termina limpa sem arquivo de saída.
pub fn run(config: &BridgeConfig) -> Result<()> {
    let mut ledger = common_agenda::open_ledger(&config.ledger_file())?;

    let command_path = config.command_file();
    let raw = fs::read_to_string(&command_path).with_context(|| {
        format!(
            "Falha ao ler o arquivo de comando {}",
            command_path.display()
        )
    })?;
    let token = raw.lines().next().unwrap_or("").trim();

    match Command::parse(token) {
        Some(Command::ScheduleAppointment) => schedule_appointment(config, &mut ledger),
        Some(Command::GetAvailableSlots) => get_available_slots(config, &ledger),
        Some(Command::GetAllAppointments) => export_appointments(config, &ledger),
        None => {
            warn!("Comando desconhecido ignorado: {:?}", token);
            Ok(())
        }
    }
}

/// SCHEDULE_APPOINTMENT: verificar-e-inserir com persistência na mutação
fn schedule_appointment(config: &BridgeConfig, ledger: &mut AppointmentLedger) -> Result<()> {
    let input_path = config.schedule_input();
    let raw = fs::read_to_string(&input_path).with_context(|| {
        format!(
            "Falha ao ler o pedido de agendamento {}",
            input_path.display()
        )
    })?;
    let request = parse_schedule_request(raw.lines().next().unwrap_or(""))?;

    let mut calendar = SlotCalendar::new();
    let output_path = config.schedule_output();

    if ledger.is_available(request.doctor_id, &request.date, &request.slot) {
        let appointment = ledger.insert(
            request.patient_id,
            request.doctor_id,
            request.date.clone(),
            request.slot.clone(),
        );
        let confirmation = format!(
            "SUCCESS\nAppointment confirmed: {} {}\n",
            appointment.date, appointment.slot
        );

        calendar.reserve(&request.date, &request.slot, request.doctor_id);

        fs::write(&output_path, confirmation).with_context(|| {
            format!("Falha ao gravar a confirmação em {}", output_path.display())
        })?;
        store::persist(ledger, &config.ledger_file())
            .context("Falha ao persistir o registro de consultas")?;

        info!(
            "Consulta confirmada: médico {} em {} {}",
            request.doctor_id, request.date, request.slot
        );
    } else {
        // Conflito é recuperável: resposta no arquivo de saída, sem
        // persistência porque nada mudou no registro
        fs::write(&output_path, SLOT_NOT_AVAILABLE).with_context(|| {
            format!(
                "Falha ao gravar a resposta de conflito em {}",
                output_path.display()
            )
        })?;

        info!(
            "Agendamento rejeitado, horário ocupado: médico {} em {} {}",
            request.doctor_id, request.date, request.slot
        );
    }

    Ok(())
}

/// GET_AVAILABLE_SLOTS: enumera os horários livres na ordem da grade
fn get_available_slots(config: &BridgeConfig, ledger: &AppointmentLedger) -> Result<()> {
    let input_path = config.slots_query();
    let raw = fs::read_to_string(&input_path).with_context(|| {
        format!(
            "Falha ao ler a consulta de horários {}",
            input_path.display()
        )
    })?;
    let mut lines = raw.lines();

    let doctor_id = lines
        .next()
        .unwrap_or("")
        .trim()
        .parse::<i64>()
        .context("campo doctorId não numérico na consulta de horários")?;
    let date = match lines.next() {
        Some(line) if !line.trim().is_empty() => line.trim().to_string(),
        _ => bail!("consulta de horários malformada: data ausente"),
    };

    let mut calendar = SlotCalendar::new();
    let slots = calendar.available_slots(ledger, &date, doctor_id);

    let mut output = String::from("AVAILABLE_SLOTS\n");
    for slot in &slots {
        output.push_str(slot);
        output.push('\n');
    }

    let output_path = config.available_slots_output();
    fs::write(&output_path, output).with_context(|| {
        format!(
            "Falha ao gravar os horários livres em {}",
            output_path.display()
        )
    })?;

    info!(
        "{} horários livres para o médico {} em {}",
        slots.len(),
        doctor_id,
        date
    );
    Ok(())
}

/// GET_ALL_APPOINTMENTS: exportação incondicional do registro completo
fn export_appointments(config: &BridgeConfig, ledger: &AppointmentLedger) -> Result<()> {
    let export_path = config.export_file();
    store::persist(ledger, &export_path).with_context(|| {
        format!(
            "Falha ao exportar o registro para {}",
            export_path.display()
        )
    })?;

    info!(
        "{} consultas exportadas para {}",
        ledger.len(),
        export_path.display()
    );
    Ok(())
}
