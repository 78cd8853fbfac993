//! Taster (catador) management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Catador;
use shared::validation::validate_email;

/// Service for managing the taster roster
#[derive(Clone)]
pub struct CatadorService {
    db: PgPool,
}

/// Input for creating a taster
#[derive(Debug, Deserialize)]
pub struct CreateCatadorInput {
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub especialidad: Option<String>,
}

/// Input for updating a taster
#[derive(Debug, Deserialize)]
pub struct UpdateCatadorInput {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub especialidad: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, sqlx::FromRow)]
struct CatadorRow {
    id: Uuid,
    nombre: String,
    email: Option<String>,
    telefono: Option<String>,
    especialidad: Option<String>,
    activo: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CatadorRow> for Catador {
    fn from(row: CatadorRow) -> Self {
        Catador {
            id: row.id,
            nombre: row.nombre,
            email: row.email,
            telefono: row.telefono,
            especialidad: row.especialidad,
            activo: row.activo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CATADOR_COLUMNS: &str =
    "id, nombre, email, telefono, especialidad, activo, created_at, updated_at";

impl CatadorService {
    /// Create a new CatadorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all tasters, alphabetical
    pub async fn get_catadores(&self) -> AppResult<Vec<Catador>> {
        let catadores = sqlx::query_as::<_, CatadorRow>(&format!(
            "SELECT {} FROM catadores ORDER BY nombre ASC",
            CATADOR_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(catadores.into_iter().map(Catador::from).collect())
    }

    /// Get a taster by ID
    pub async fn get_catador(&self, catador_id: Uuid) -> AppResult<Catador> {
        let catador = sqlx::query_as::<_, CatadorRow>(&format!(
            "SELECT {} FROM catadores WHERE id = $1",
            CATADOR_COLUMNS
        ))
        .bind(catador_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Catador".to_string()))?;

        Ok(catador.into())
    }

    /// Create a new taster
    pub async fn create_catador(&self, input: CreateCatadorInput) -> AppResult<Catador> {
        if input.nombre.trim().is_empty() {
            return Err(AppError::Validation {
                field: "nombre".to_string(),
                message: "Taster name cannot be empty".to_string(),
                message_es: "El nombre del catador no puede estar vacío".to_string(),
            });
        }

        Self::validate_email_field(input.email.as_deref())?;

        let catador = sqlx::query_as::<_, CatadorRow>(&format!(
            r#"
            INSERT INTO catadores (nombre, email, telefono, especialidad)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CATADOR_COLUMNS
        ))
        .bind(&input.nombre)
        .bind(&input.email)
        .bind(&input.telefono)
        .bind(&input.especialidad)
        .fetch_one(&self.db)
        .await?;

        Ok(catador.into())
    }

    /// Update a taster
    pub async fn update_catador(
        &self,
        catador_id: Uuid,
        input: UpdateCatadorInput,
    ) -> AppResult<Catador> {
        let existing = self.get_catador(catador_id).await?;

        if let Some(ref nombre) = input.nombre {
            if nombre.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "nombre".to_string(),
                    message: "Taster name cannot be empty".to_string(),
                    message_es: "El nombre del catador no puede estar vacío".to_string(),
                });
            }
        }

        Self::validate_email_field(input.email.as_deref())?;

        let nombre = input.nombre.unwrap_or(existing.nombre);
        let email = input.email.or(existing.email);
        let telefono = input.telefono.or(existing.telefono);
        let especialidad = input.especialidad.or(existing.especialidad);
        let activo = input.activo.unwrap_or(existing.activo);

        let catador = sqlx::query_as::<_, CatadorRow>(&format!(
            r#"
            UPDATE catadores
            SET nombre = $1, email = $2, telefono = $3, especialidad = $4,
                activo = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            CATADOR_COLUMNS
        ))
        .bind(&nombre)
        .bind(&email)
        .bind(&telefono)
        .bind(&especialidad)
        .bind(activo)
        .bind(catador_id)
        .fetch_one(&self.db)
        .await?;

        Ok(catador.into())
    }

    /// Delete a taster
    pub async fn delete_catador(&self, catador_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM catadores WHERE id = $1")
            .bind(catador_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Catador".to_string()));
        }

        Ok(())
    }

    fn validate_email_field(email: Option<&str>) -> AppResult<()> {
        if let Some(email) = email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
                message_es: "El correo electrónico no es válido".to_string(),
            })?;
        }
        Ok(())
    }
}
