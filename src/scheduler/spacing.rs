//! Política de separación entre visitas
//!
//! Evita que las visitas programadas se amontonen dentro de una ventana
//! corta. Dos visitas entran en conflicto si la diferencia absoluta en días
//! es estrictamente menor a la separación mínima configurada.

use chrono::NaiveDate;

/// true si el candidato colisiona con alguna fecha ya programada
pub fn violates_spacing<I>(candidate: NaiveDate, scheduled_dates: I, min_separation_days: i64) -> bool
where
    I: IntoIterator<Item = NaiveDate>,
{
    scheduled_dates
        .into_iter()
        .any(|existing| (candidate - existing).num_days().abs() < min_separation_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_conflict_inside_window() {
        let scheduled = vec![date(2024, 3, 10)];
        assert!(violates_spacing(date(2024, 3, 10), scheduled.clone(), 7));
        assert!(violates_spacing(date(2024, 3, 13), scheduled.clone(), 7));
        assert!(violates_spacing(date(2024, 3, 7), scheduled, 7));
    }

    #[test]
    fn test_exact_separation_is_allowed() {
        // diferencia == min_separation no es conflicto (estrictamente menor)
        let scheduled = vec![date(2024, 3, 10)];
        assert!(!violates_spacing(date(2024, 3, 17), scheduled.clone(), 7));
        assert!(!violates_spacing(date(2024, 3, 3), scheduled, 7));
    }

    #[test]
    fn test_empty_schedule_never_conflicts() {
        assert!(!violates_spacing(date(2024, 3, 10), Vec::new(), 7));
    }

    #[test]
    fn test_any_of_multiple_dates_conflicts() {
        let scheduled = vec![date(2024, 3, 1), date(2024, 3, 20)];
        assert!(violates_spacing(date(2024, 3, 18), scheduled, 7));
    }
}
