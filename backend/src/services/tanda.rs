//! Tasting round (tanda) management service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Tanda, TandaEstado};
use shared::validation::{validate_catador_numero, validate_hora};

/// Service for managing tasting rounds
#[derive(Clone)]
pub struct TandaService {
    db: PgPool,
}

/// Input for creating a tasting round
#[derive(Debug, Deserialize)]
pub struct CreateTandaInput {
    pub nombre: String,
    pub fecha: NaiveDate,
    pub hora: Option<String>,
    pub lugar: Option<String>,
    pub muestras_ids: Option<Vec<Uuid>>,
    pub numero_catadores: Option<i32>,
    pub notas: Option<String>,
}

/// Input for updating a tasting round
#[derive(Debug, Deserialize)]
pub struct UpdateTandaInput {
    pub nombre: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub hora: Option<String>,
    pub lugar: Option<String>,
    pub muestras_ids: Option<Vec<Uuid>>,
    pub numero_catadores: Option<i32>,
    pub notas: Option<String>,
}

/// Input for a state change request
#[derive(Debug, Deserialize)]
pub struct CambiarEstadoInput {
    pub estado: TandaEstado,
}

#[derive(Debug, sqlx::FromRow)]
struct TandaRow {
    id: Uuid,
    nombre: String,
    fecha: NaiveDate,
    hora: Option<String>,
    lugar: Option<String>,
    estado: String,
    muestras_ids: Vec<Uuid>,
    numero_catadores: Option<i32>,
    notas: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TandaRow> for Tanda {
    fn from(row: TandaRow) -> Self {
        Tanda {
            id: row.id,
            nombre: row.nombre,
            fecha: row.fecha,
            hora: row.hora,
            lugar: row.lugar,
            // The column only ever holds values written through TandaEstado
            estado: TandaEstado::from_str(&row.estado).unwrap_or(TandaEstado::Programada),
            muestras_ids: row.muestras_ids,
            numero_catadores: row.numero_catadores,
            notas: row.notas,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TANDA_COLUMNS: &str = "id, nombre, fecha, hora, lugar, estado, muestras_ids, numero_catadores, notas, created_at, updated_at";

impl TandaService {
    /// Create a new TandaService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all tasting rounds, most recent session date first
    pub async fn get_tandas(&self) -> AppResult<Vec<Tanda>> {
        let rows = sqlx::query_as::<_, TandaRow>(&format!(
            "SELECT {} FROM tandas ORDER BY fecha DESC, created_at DESC",
            TANDA_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Tanda::from).collect())
    }

    /// Get a tasting round by ID
    pub async fn get_tanda(&self, tanda_id: Uuid) -> AppResult<Tanda> {
        let row = sqlx::query_as::<_, TandaRow>(&format!(
            "SELECT {} FROM tandas WHERE id = $1",
            TANDA_COLUMNS
        ))
        .bind(tanda_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tanda".to_string()))?;

        Ok(row.into())
    }

    /// Create a new tasting round, always starting as Programada
    pub async fn create_tanda(&self, input: CreateTandaInput) -> AppResult<Tanda> {
        if input.nombre.trim().is_empty() {
            return Err(AppError::Validation {
                field: "nombre".to_string(),
                message: "Round name cannot be empty".to_string(),
                message_es: "El nombre de la tanda no puede estar vacío".to_string(),
            });
        }

        Self::validate_hora_field(input.hora.as_deref())?;
        Self::validate_catadores_field(input.numero_catadores)?;

        let muestras_ids = input.muestras_ids.unwrap_or_default();
        self.verify_muestras_exist(&muestras_ids).await?;

        let row = sqlx::query_as::<_, TandaRow>(&format!(
            r#"
            INSERT INTO tandas (nombre, fecha, hora, lugar, estado, muestras_ids, numero_catadores, notas)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TANDA_COLUMNS
        ))
        .bind(&input.nombre)
        .bind(input.fecha)
        .bind(&input.hora)
        .bind(&input.lugar)
        .bind(TandaEstado::Programada.as_str())
        .bind(&muestras_ids)
        .bind(&input.numero_catadores)
        .bind(&input.notas)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a tasting round. State changes go through cambiar_estado.
    pub async fn update_tanda(&self, tanda_id: Uuid, input: UpdateTandaInput) -> AppResult<Tanda> {
        let existing = self.get_tanda(tanda_id).await?;

        if let Some(ref nombre) = input.nombre {
            if nombre.trim().is_empty() {
                return Err(AppError::Validation {
                    field: "nombre".to_string(),
                    message: "Round name cannot be empty".to_string(),
                    message_es: "El nombre de la tanda no puede estar vacío".to_string(),
                });
            }
        }

        Self::validate_hora_field(input.hora.as_deref())?;
        Self::validate_catadores_field(input.numero_catadores)?;

        if let Some(ref ids) = input.muestras_ids {
            self.verify_muestras_exist(ids).await?;
        }

        let nombre = input.nombre.unwrap_or(existing.nombre);
        let fecha = input.fecha.unwrap_or(existing.fecha);
        let hora = input.hora.or(existing.hora);
        let lugar = input.lugar.or(existing.lugar);
        let muestras_ids = input.muestras_ids.unwrap_or(existing.muestras_ids);
        let numero_catadores = input.numero_catadores.or(existing.numero_catadores);
        let notas = input.notas.or(existing.notas);

        let row = sqlx::query_as::<_, TandaRow>(&format!(
            r#"
            UPDATE tandas
            SET nombre = $1, fecha = $2, hora = $3, lugar = $4,
                muestras_ids = $5, numero_catadores = $6, notas = $7,
                updated_at = NOW()
            WHERE id = $8
            RETURNING {}
            "#,
            TANDA_COLUMNS
        ))
        .bind(&nombre)
        .bind(fecha)
        .bind(&hora)
        .bind(&lugar)
        .bind(&muestras_ids)
        .bind(&numero_catadores)
        .bind(&notas)
        .bind(tanda_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Transition a tasting round to a new state
    pub async fn cambiar_estado(&self, tanda_id: Uuid, nuevo: TandaEstado) -> AppResult<Tanda> {
        let existing = self.get_tanda(tanda_id).await?;

        if !existing.estado.can_transition_to(nuevo) {
            return Err(AppError::InvalidStateTransition(format!(
                "cannot move tanda from '{}' to '{}'",
                existing.estado.as_str(),
                nuevo.as_str()
            )));
        }

        let row = sqlx::query_as::<_, TandaRow>(&format!(
            "UPDATE tandas SET estado = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            TANDA_COLUMNS
        ))
        .bind(nuevo.as_str())
        .bind(tanda_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a tasting round
    pub async fn delete_tanda(&self, tanda_id: Uuid) -> AppResult<()> {
        let existing = self.get_tanda(tanda_id).await?;

        // Rounds already underway keep their record for the archive
        if existing.estado == TandaEstado::EnCurso {
            return Err(AppError::Conflict {
                resource: "tanda".to_string(),
                message: "Cannot delete a round that is in progress".to_string(),
                message_es: "No se puede eliminar una tanda en curso".to_string(),
            });
        }

        sqlx::query("DELETE FROM tandas WHERE id = $1")
            .bind(tanda_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn verify_muestras_exist(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let found = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM muestras WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(&self.db)
        .await?;

        if found as usize != ids.len() {
            return Err(AppError::Validation {
                field: "muestras_ids".to_string(),
                message: "One or more sample IDs do not exist".to_string(),
                message_es: "Una o más muestras no existen".to_string(),
            });
        }

        Ok(())
    }

    fn validate_hora_field(hora: Option<&str>) -> AppResult<()> {
        if let Some(hora) = hora {
            validate_hora(hora).map_err(|msg| AppError::Validation {
                field: "hora".to_string(),
                message: msg.to_string(),
                message_es: "La hora debe tener el formato HH:MM".to_string(),
            })?;
        }
        Ok(())
    }

    fn validate_catadores_field(numero: Option<i32>) -> AppResult<()> {
        if let Some(numero) = numero {
            validate_catador_numero(numero).map_err(|msg| AppError::Validation {
                field: "numero_catadores".to_string(),
                message: msg.to_string(),
                message_es: "El número de catadores debe ser al menos 1".to_string(),
            })?;
        }
        Ok(())
    }
}
