//! Registro de consultas agendadas
//!
//! Este módulo mantém o conjunto de consultas e arbitra conflitos de
//! agendamento por (médico, data, horário)

use std::collections::HashMap;

use tracing::debug;

use crate::error::AgendaError;
use crate::models::{Appointment, AppointmentStatus};

/// Conjunto de consultas agendadas, fonte única de verdade para conflitos
///
/// Os registros ficam em uma arena com iteração na ordem de inserção; um
/// índice por (médico, data, horário) responde verificações de
/// disponibilidade sem varrer o conjunto inteiro.
#[derive(Debug)]
pub struct AppointmentLedger {
    records: Vec<Appointment>,
    index: HashMap<(i64, String, String), usize>,
    next_id: i64,
}

impl Default for AppointmentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentLedger {
    /// Cria um registro vazio; a sequência de ids começa em 1
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Reconstrói o registro a partir de consultas restauradas do armazenamento
    ///
    /// A sequência de ids continua a partir do maior id restaurado + 1. Um
    /// par de registros SCHEDULED com o mesmo (médico, data, horário) viola
    /// a invariante de unicidade e é rejeitado como armazenamento corrompido.
    pub fn from_records(records: Vec<Appointment>) -> Result<Self, AgendaError> {
        let mut ledger = Self::new();
        for appointment in records {
            if appointment.status == AppointmentStatus::Scheduled
                && !ledger.is_available(appointment.doctor_id, &appointment.date, &appointment.slot)
            {
                return Err(AgendaError::DuplicateBooking {
                    doctor_id: appointment.doctor_id,
                    date: appointment.date,
                    slot: appointment.slot,
                });
            }
            ledger.next_id = ledger.next_id.max(appointment.id + 1);
            ledger.push(appointment);
        }
        Ok(ledger)
    }

    fn push(&mut self, appointment: Appointment) {
        if appointment.status == AppointmentStatus::Scheduled {
            self.index.insert(
                (
                    appointment.doctor_id,
                    appointment.date.clone(),
                    appointment.slot.clone(),
                ),
                self.records.len(),
            );
        }
        self.records.push(appointment);
    }

    /// Verifica se o horário está livre para o médico na data informada
    pub fn is_available(&self, doctor_id: i64, date: &str, slot: &str) -> bool {
        !self
            .index
            .contains_key(&(doctor_id, date.to_string(), slot.to_string()))
    }

    /// Insere uma nova consulta SCHEDULED e devolve o registro criado
    ///
    /// A disponibilidade NÃO é verificada aqui; quem chama deve consultar
    /// `is_available` antes, de forma que a sequência verificar-e-inserir
    /// aconteça inteira no chamador.
    pub fn insert(
        &mut self,
        patient_id: i64,
        doctor_id: i64,
        date: String,
        slot: String,
    ) -> &Appointment {
        let appointment = Appointment {
            id: self.next_id,
            patient_id,
            doctor_id,
            date,
            slot,
            status: AppointmentStatus::Scheduled,
        };
        self.next_id += 1;

        let position = self.records.len();
        self.push(appointment);

        let inserted = &self.records[position];
        debug!("Consulta {} adicionada ao registro", inserted.id);
        inserted
    }

    /// Itera sobre as consultas na ordem de inserção
    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.records.iter()
    }

    /// Número de consultas no registro
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Indica se o registro está vazio
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, doctor_id: i64, date: &str, slot: &str) -> Appointment {
        Appointment {
            id,
            patient_id: 10 + id,
            doctor_id,
            date: date.to_string(),
            slot: slot.to_string(),
            status: AppointmentStatus::Scheduled,
        }
    }

    #[test]
    fn test_insert_marks_slot_taken() {
        let mut ledger = AppointmentLedger::new();
        assert!(ledger.is_available(3, "2025-01-10", "09:00-10:00"));

        ledger.insert(7, 3, "2025-01-10".to_string(), "09:00-10:00".to_string());

        // Ocupado para o mesmo médico, livre para outro médico e outro horário
        assert!(!ledger.is_available(3, "2025-01-10", "09:00-10:00"));
        assert!(ledger.is_available(4, "2025-01-10", "09:00-10:00"));
        assert!(ledger.is_available(3, "2025-01-10", "10:00-11:00"));
    }

    #[test]
    fn test_ids_start_at_one_and_grow() {
        let mut ledger = AppointmentLedger::new();
        let first = ledger
            .insert(7, 3, "2025-01-10".to_string(), "09:00-10:00".to_string())
            .id;
        let second = ledger
            .insert(8, 3, "2025-01-10".to_string(), "10:00-11:00".to_string())
            .id;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_id_sequence_continues_after_restore() {
        let ledger = AppointmentLedger::from_records(vec![
            record(2, 3, "2025-01-10", "09:00-10:00"),
            record(7, 3, "2025-01-10", "10:00-11:00"),
        ])
        .unwrap();

        let mut ledger = ledger;
        let next = ledger
            .insert(9, 4, "2025-01-11".to_string(), "09:00-10:00".to_string())
            .id;

        // Estritamente maior que todos os ids presentes
        assert_eq!(next, 8);
    }

    #[test]
    fn test_duplicate_triple_rejected_on_restore() {
        let result = AppointmentLedger::from_records(vec![
            record(1, 3, "2025-01-10", "09:00-10:00"),
            record(2, 3, "2025-01-10", "09:00-10:00"),
        ]);

        assert!(matches!(result, Err(AgendaError::DuplicateBooking { .. })));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut ledger = AppointmentLedger::new();
        ledger.insert(7, 3, "2025-01-10".to_string(), "16:00-17:00".to_string());
        ledger.insert(8, 3, "2025-01-10".to_string(), "09:00-10:00".to_string());

        let slots: Vec<&str> = ledger.iter().map(|a| a.slot.as_str()).collect();
        assert_eq!(slots, vec!["16:00-17:00", "09:00-10:00"]);
    }
}
