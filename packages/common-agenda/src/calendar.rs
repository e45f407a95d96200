//! Grade de horários diários por médico e data
//!
//! Visão efêmera de disponibilidade derivada do registro de consultas. Não é
//! persistida: cada execução do processo a reconstrói a partir da verdade
//! durável do registro.

use std::collections::HashMap;

use crate::error::AgendaError;
use crate::ledger::AppointmentLedger;
use crate::models::SlotEntry;

/// Janelas fixas de atendimento, na ordem de enumeração do protocolo
pub const DAILY_SLOTS: &[&str] = &[
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
];

/// Valida se o token pertence à grade diária
pub fn validate_slot(token: &str) -> Result<(), AgendaError> {
    if DAILY_SLOTS.contains(&token) {
        Ok(())
    } else {
        Err(AgendaError::InvalidSlot(token.to_string()))
    }
}

/// Grade de disponibilidade por data
///
/// O balde de cada data é compartilhado entre médicos: as entradas de cada
/// médico são criadas na primeira consulta ao par (data, médico) e as buscas
/// filtram por médico.
#[derive(Debug, Default)]
pub struct SlotCalendar {
    days: HashMap<String, Vec<SlotEntry>>,
}

impl SlotCalendar {
    pub fn new() -> Self {
        Self {
            days: HashMap::new(),
        }
    }

    /// Garante as entradas do par (data, médico), derivadas do registro
    ///
    /// Construção preguiçosa, uma única vez por par dentro da execução.
    pub fn ensure_initialized(
        &mut self,
        ledger: &AppointmentLedger,
        date: &str,
        doctor_id: i64,
    ) {
        let entries = self.days.entry(date.to_string()).or_default();
        if entries.iter().any(|entry| entry.doctor_id == doctor_id) {
            return;
        }

        for slot in DAILY_SLOTS {
            entries.push(SlotEntry {
                time: (*slot).to_string(),
                available: ledger.is_available(doctor_id, date, slot),
                doctor_id,
            });
        }
    }

    /// Enumera os horários livres do médico na data, na ordem da grade
    pub fn available_slots(
        &mut self,
        ledger: &AppointmentLedger,
        date: &str,
        doctor_id: i64,
    ) -> Vec<String> {
        self.ensure_initialized(ledger, date, doctor_id);

        self.days
            .get(date)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.doctor_id == doctor_id && entry.available)
                    .map(|entry| entry.time.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Marca o horário como ocupado para o restante da execução
    ///
    /// Trava otimista em memória, não é a fonte de verdade: se não existe
    /// entrada correspondente a chamada é silenciosamente ignorada.
    pub fn reserve(&mut self, date: &str, time: &str, doctor_id: i64) {
        if let Some(entries) = self.days.get_mut(date) {
            if let Some(entry) = entries
                .iter_mut()
                .find(|entry| entry.doctor_id == doctor_id && entry.time == time)
            {
                entry.available = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_enumerated_in_grid_order() {
        let mut ledger = AppointmentLedger::new();
        ledger.insert(7, 3, "2025-01-10".to_string(), "14:00-15:00".to_string());

        let mut calendar = SlotCalendar::new();
        let slots = calendar.available_slots(&ledger, "2025-01-10", 3);

        // Ordem fixa da grade, sem o horário já ocupado
        assert_eq!(
            slots,
            vec![
                "09:00-10:00",
                "10:00-11:00",
                "11:00-12:00",
                "15:00-16:00",
                "16:00-17:00",
            ]
        );
    }

    #[test]
    fn test_reserve_hides_slot_from_queries() {
        let ledger = AppointmentLedger::new();
        let mut calendar = SlotCalendar::new();

        calendar.ensure_initialized(&ledger, "2025-01-10", 3);
        calendar.reserve("2025-01-10", "09:00-10:00", 3);

        let slots = calendar.available_slots(&ledger, "2025-01-10", 3);
        assert_eq!(slots.len(), DAILY_SLOTS.len() - 1);
        assert!(!slots.iter().any(|s| s == "09:00-10:00"));
    }

    #[test]
    fn test_reserve_is_idempotent_and_silent_on_missing_entry() {
        let ledger = AppointmentLedger::new();
        let mut calendar = SlotCalendar::new();

        calendar.ensure_initialized(&ledger, "2025-01-10", 3);
        calendar.reserve("2025-01-10", "09:00-10:00", 3);
        calendar.reserve("2025-01-10", "09:00-10:00", 3);

        // Entrada inexistente: data nunca inicializada e médico sem entradas
        calendar.reserve("2030-12-31", "09:00-10:00", 3);
        calendar.reserve("2025-01-10", "09:00-10:00", 99);

        let slots = calendar.available_slots(&ledger, "2025-01-10", 3);
        assert_eq!(slots.len(), DAILY_SLOTS.len() - 1);
    }

    #[test]
    fn test_date_bucket_shared_between_doctors() {
        let mut ledger = AppointmentLedger::new();
        ledger.insert(7, 3, "2025-01-10".to_string(), "09:00-10:00".to_string());

        let mut calendar = SlotCalendar::new();

        // O primeiro médico inicializa o balde da data; o segundo acumula as
        // próprias entradas no mesmo balde
        let doctor_three = calendar.available_slots(&ledger, "2025-01-10", 3);
        let doctor_four = calendar.available_slots(&ledger, "2025-01-10", 4);

        assert_eq!(doctor_three.len(), DAILY_SLOTS.len() - 1);
        assert_eq!(doctor_four.len(), DAILY_SLOTS.len());
    }

    #[test]
    fn test_validate_slot() {
        assert!(validate_slot("09:00-10:00").is_ok());
        assert!(validate_slot("12:00-13:00").is_err());
        assert!(validate_slot("").is_err());
    }
}
