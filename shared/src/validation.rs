//! Validation utilities for the Vinisima Tasting Management Platform

// ============================================================================
// Tasting Domain Validations
// ============================================================================

/// Validate a sample code (1-10 alphanumeric characters, e.g. "4975")
pub fn validate_codigo_muestra(codigo: &str) -> Result<(), &'static str> {
    if codigo.is_empty() {
        return Err("Sample code is required");
    }
    if codigo.len() > 10 {
        return Err("Sample code must be at most 10 characters");
    }
    if !codigo.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Sample code must be alphanumeric only");
    }
    Ok(())
}

/// Validate a vintage year (anada)
pub fn validate_anada(anada: i32) -> Result<(), &'static str> {
    if !(1900..=2100).contains(&anada) {
        return Err("Vintage year must be between 1900 and 2100");
    }
    Ok(())
}

/// Validate a session time in 24h "HH:MM" form
pub fn validate_hora(hora: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = hora.split(':').collect();
    if parts.len() != 2 || parts[0].len() != 2 || parts[1].len() != 2 {
        return Err("Time must be in HH:MM format");
    }
    let hours: u32 = parts[0].parse().map_err(|_| "Time must be in HH:MM format")?;
    let minutes: u32 = parts[1].parse().map_err(|_| "Time must be in HH:MM format")?;
    if hours > 23 || minutes > 59 {
        return Err("Time out of range");
    }
    Ok(())
}

/// Validate a taster ordinal (catador number on the station)
pub fn validate_catador_numero(numero: i32) -> Result<(), &'static str> {
    if numero < 1 {
        return Err("Taster number must be at least 1");
    }
    Ok(())
}

/// Validate a station submission counter
pub fn validate_orden(orden: i32) -> Result<(), &'static str> {
    if orden < 1 {
        return Err("Orden must be at least 1");
    }
    Ok(())
}

/// Validate a table number
pub fn validate_numero_mesa(numero: i32) -> Result<(), &'static str> {
    if numero < 1 {
        return Err("Table number must be at least 1");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_codigo_muestra_valid() {
        assert!(validate_codigo_muestra("4975").is_ok());
        assert!(validate_codigo_muestra("A12").is_ok());
        assert!(validate_codigo_muestra("1").is_ok());
    }

    #[test]
    fn test_validate_codigo_muestra_invalid() {
        assert!(validate_codigo_muestra("").is_err());
        assert!(validate_codigo_muestra("12345678901").is_err()); // Too long
        assert!(validate_codigo_muestra("49-75").is_err()); // Special char
    }

    #[test]
    fn test_validate_anada() {
        assert!(validate_anada(2019).is_ok());
        assert!(validate_anada(1900).is_ok());
        assert!(validate_anada(2100).is_ok());
        assert!(validate_anada(1899).is_err());
        assert!(validate_anada(2101).is_err());
    }

    #[test]
    fn test_validate_hora_valid() {
        assert!(validate_hora("09:30").is_ok());
        assert!(validate_hora("00:00").is_ok());
        assert!(validate_hora("23:59").is_ok());
    }

    #[test]
    fn test_validate_hora_invalid() {
        assert!(validate_hora("24:00").is_err());
        assert!(validate_hora("12:60").is_err());
        assert!(validate_hora("9:30").is_err());
        assert!(validate_hora("0930").is_err());
        assert!(validate_hora("ab:cd").is_err());
    }

    #[test]
    fn test_validate_catador_numero() {
        assert!(validate_catador_numero(1).is_ok());
        assert!(validate_catador_numero(115).is_ok());
        assert!(validate_catador_numero(0).is_err());
        assert!(validate_catador_numero(-3).is_err());
    }

    #[test]
    fn test_validate_orden() {
        assert!(validate_orden(1).is_ok());
        assert!(validate_orden(0).is_err());
    }

    #[test]
    fn test_validate_numero_mesa() {
        assert!(validate_numero_mesa(1).is_ok());
        assert!(validate_numero_mesa(0).is_err());
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("catador@vinisima.es").is_ok());
        assert!(validate_email("user.name@domain.co").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }
}
