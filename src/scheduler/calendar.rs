//! Reglas de calendario
//!
//! Predicados puros sobre fechas: día inhábil semanal y avance al siguiente
//! día permitido.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// true si la fecha cae en el día inhábil semanal de la flota
pub fn is_disallowed_day(date: NaiveDate, disallowed_weekday: Weekday) -> bool {
    date.weekday() == disallowed_weekday
}

/// Avanzar de un día a la vez hasta salir del día inhábil.
/// Con un solo día inhábil por semana termina en a lo más 7 pasos.
pub fn next_allowed_day(date: NaiveDate, disallowed_weekday: Weekday) -> NaiveDate {
    let mut candidate = date;
    while is_disallowed_day(candidate, disallowed_weekday) {
        candidate += Duration::days(1);
    }
    candidate
}

/// Programar en el pasado es inválido: si la fecha base quedó en o antes de
/// hoy, se recorre al día de mañana como mínimo.
pub fn clamp_to_future(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    if date <= today {
        today + Duration::days(1)
    } else {
        date
    }
}
