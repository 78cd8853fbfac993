//! Table (mesa) management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Mesa;
use shared::validation::validate_numero_mesa;

/// Service for managing tasting room tables
#[derive(Clone)]
pub struct MesaService {
    db: PgPool,
}

/// Input for creating a table
#[derive(Debug, Deserialize)]
pub struct CreateMesaInput {
    pub numero: i32,
    pub nombre: Option<String>,
}

/// Input for updating a table
#[derive(Debug, Deserialize)]
pub struct UpdateMesaInput {
    pub numero: Option<i32>,
    pub nombre: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct MesaRow {
    id: Uuid,
    numero: i32,
    nombre: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MesaRow> for Mesa {
    fn from(row: MesaRow) -> Self {
        Mesa {
            id: row.id,
            numero: row.numero,
            nombre: row.nombre,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const MESA_COLUMNS: &str = "id, numero, nombre, created_at, updated_at";

impl MesaService {
    /// Create a new MesaService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all tables ordered by number
    pub async fn get_mesas(&self) -> AppResult<Vec<Mesa>> {
        let mesas = sqlx::query_as::<_, MesaRow>(&format!(
            "SELECT {} FROM mesas ORDER BY numero ASC",
            MESA_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(mesas.into_iter().map(Mesa::from).collect())
    }

    /// Get a table by ID
    pub async fn get_mesa(&self, mesa_id: Uuid) -> AppResult<Mesa> {
        let mesa = sqlx::query_as::<_, MesaRow>(&format!(
            "SELECT {} FROM mesas WHERE id = $1",
            MESA_COLUMNS
        ))
        .bind(mesa_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Mesa".to_string()))?;

        Ok(mesa.into())
    }

    /// Create a new table
    pub async fn create_mesa(&self, input: CreateMesaInput) -> AppResult<Mesa> {
        Self::validate_numero_field(input.numero)?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM mesas WHERE numero = $1",
        )
        .bind(input.numero)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("numero".to_string()));
        }

        let mesa = sqlx::query_as::<_, MesaRow>(&format!(
            "INSERT INTO mesas (numero, nombre) VALUES ($1, $2) RETURNING {}",
            MESA_COLUMNS
        ))
        .bind(input.numero)
        .bind(&input.nombre)
        .fetch_one(&self.db)
        .await?;

        Ok(mesa.into())
    }

    /// Update a table
    pub async fn update_mesa(&self, mesa_id: Uuid, input: UpdateMesaInput) -> AppResult<Mesa> {
        let existing = self.get_mesa(mesa_id).await?;

        if let Some(numero) = input.numero {
            Self::validate_numero_field(numero)?;

            let duplicate = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM mesas WHERE numero = $1 AND id != $2",
            )
            .bind(numero)
            .bind(mesa_id)
            .fetch_one(&self.db)
            .await?;

            if duplicate > 0 {
                return Err(AppError::DuplicateEntry("numero".to_string()));
            }
        }

        let numero = input.numero.unwrap_or(existing.numero);
        let nombre = input.nombre.or(existing.nombre);

        let mesa = sqlx::query_as::<_, MesaRow>(&format!(
            "UPDATE mesas SET numero = $1, nombre = $2, updated_at = NOW() WHERE id = $3 RETURNING {}",
            MESA_COLUMNS
        ))
        .bind(numero)
        .bind(&nombre)
        .bind(mesa_id)
        .fetch_one(&self.db)
        .await?;

        Ok(mesa.into())
    }

    /// Delete a table
    pub async fn delete_mesa(&self, mesa_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM mesas WHERE id = $1")
            .bind(mesa_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Mesa".to_string()));
        }

        Ok(())
    }

    fn validate_numero_field(numero: i32) -> AppResult<()> {
        validate_numero_mesa(numero).map_err(|msg| AppError::Validation {
            field: "numero".to_string(),
            message: msg.to_string(),
            message_es: "El número de mesa debe ser al menos 1".to_string(),
        })
    }
}
