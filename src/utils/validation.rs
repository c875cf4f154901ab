//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos en la frontera de la API.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validar y convertir string a fecha calendario (sin componente de hora)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar formato de placa de vehículo
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 5 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que la fecha de fin no sea anterior a la de inicio
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        let mut error = ValidationError::new("date_order");
        error.add_param("start".into(), &start.to_string());
        error.add_param("end".into(), &end.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        let valid_date = "2024-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2024/01/15";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("AB-123-CD").is_ok());
        assert!(validate_plate("A").is_err());
        assert!(validate_plate("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_date_order() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(validate_date_order(start, end).is_ok());
        assert!(validate_date_order(start, start).is_ok());
        assert!(validate_date_order(end, start).is_err());
    }
}
