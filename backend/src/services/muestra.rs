//! Sample (muestra) management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Muestra;
use shared::validation::{validate_anada, validate_codigo_muestra};

/// Service for managing tasting samples
#[derive(Clone)]
pub struct MuestraService {
    db: PgPool,
}

/// Input for creating a sample
#[derive(Debug, Deserialize)]
pub struct CreateMuestraInput {
    pub codigo: String,
    pub nombre: String,
    pub categoria: Option<String>,
    pub tipo: Option<String>,
    pub bodega: Option<String>,
    pub origen: Option<String>,
    pub anada: Option<i32>,
    pub descripcion: Option<String>,
}

/// Input for updating a sample
#[derive(Debug, Deserialize)]
pub struct UpdateMuestraInput {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub categoria: Option<String>,
    pub tipo: Option<String>,
    pub bodega: Option<String>,
    pub origen: Option<String>,
    pub anada: Option<i32>,
    pub descripcion: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct MuestraRow {
    id: Uuid,
    codigo: String,
    nombre: String,
    categoria: Option<String>,
    tipo: Option<String>,
    bodega: Option<String>,
    origen: Option<String>,
    anada: Option<i32>,
    descripcion: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MuestraRow> for Muestra {
    fn from(row: MuestraRow) -> Self {
        Muestra {
            id: row.id,
            codigo: row.codigo,
            nombre: row.nombre,
            categoria: row.categoria,
            tipo: row.tipo,
            bodega: row.bodega,
            origen: row.origen,
            anada: row.anada,
            descripcion: row.descripcion,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const MUESTRA_COLUMNS: &str = "id, codigo, nombre, categoria, tipo, bodega, origen, anada, descripcion, created_at, updated_at";

impl MuestraService {
    /// Create a new MuestraService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all samples, newest first
    pub async fn get_muestras(&self) -> AppResult<Vec<Muestra>> {
        let rows = sqlx::query_as::<_, MuestraRow>(&format!(
            "SELECT {} FROM muestras ORDER BY created_at DESC",
            MUESTRA_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Muestra::from).collect())
    }

    /// Get a sample by ID
    pub async fn get_muestra(&self, muestra_id: Uuid) -> AppResult<Muestra> {
        let row = sqlx::query_as::<_, MuestraRow>(&format!(
            "SELECT {} FROM muestras WHERE id = $1",
            MUESTRA_COLUMNS
        ))
        .bind(muestra_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Muestra".to_string()))?;

        Ok(row.into())
    }

    /// Create a new sample
    pub async fn create_muestra(&self, input: CreateMuestraInput) -> AppResult<Muestra> {
        Self::validate_codigo(&input.codigo)?;
        Self::validate_anada_field(input.anada)?;

        if input.nombre.trim().is_empty() {
            return Err(AppError::Validation {
                field: "nombre".to_string(),
                message: "Sample name cannot be empty".to_string(),
                message_es: "El nombre de la muestra no puede estar vacío".to_string(),
            });
        }

        // The code printed on the blind bottle must be unique
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM muestras WHERE UPPER(codigo) = UPPER($1)",
        )
        .bind(&input.codigo)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("codigo".to_string()));
        }

        let row = sqlx::query_as::<_, MuestraRow>(&format!(
            r#"
            INSERT INTO muestras (codigo, nombre, categoria, tipo, bodega, origen, anada, descripcion)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MUESTRA_COLUMNS
        ))
        .bind(&input.codigo)
        .bind(&input.nombre)
        .bind(&input.categoria)
        .bind(&input.tipo)
        .bind(&input.bodega)
        .bind(&input.origen)
        .bind(&input.anada)
        .bind(&input.descripcion)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a sample
    pub async fn update_muestra(
        &self,
        muestra_id: Uuid,
        input: UpdateMuestraInput,
    ) -> AppResult<Muestra> {
        let existing = self.get_muestra(muestra_id).await?;

        if let Some(ref codigo) = input.codigo {
            Self::validate_codigo(codigo)?;

            let duplicate = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM muestras WHERE UPPER(codigo) = UPPER($1) AND id != $2",
            )
            .bind(codigo)
            .bind(muestra_id)
            .fetch_one(&self.db)
            .await?;

            if duplicate > 0 {
                return Err(AppError::DuplicateEntry("codigo".to_string()));
            }
        }

        if input.anada.is_some() {
            Self::validate_anada_field(input.anada)?;
        }

        let codigo = input.codigo.unwrap_or(existing.codigo);
        let nombre = input.nombre.unwrap_or(existing.nombre);
        let categoria = input.categoria.or(existing.categoria);
        let tipo = input.tipo.or(existing.tipo);
        let bodega = input.bodega.or(existing.bodega);
        let origen = input.origen.or(existing.origen);
        let anada = input.anada.or(existing.anada);
        let descripcion = input.descripcion.or(existing.descripcion);

        let row = sqlx::query_as::<_, MuestraRow>(&format!(
            r#"
            UPDATE muestras
            SET codigo = $1, nombre = $2, categoria = $3, tipo = $4,
                bodega = $5, origen = $6, anada = $7, descripcion = $8,
                updated_at = NOW()
            WHERE id = $9
            RETURNING {}
            "#,
            MUESTRA_COLUMNS
        ))
        .bind(&codigo)
        .bind(&nombre)
        .bind(&categoria)
        .bind(&tipo)
        .bind(&bodega)
        .bind(&origen)
        .bind(&anada)
        .bind(&descripcion)
        .bind(muestra_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a sample
    pub async fn delete_muestra(&self, muestra_id: Uuid) -> AppResult<()> {
        // Refuse to delete a sample that already has submitted sheets
        let cata_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT (SELECT COUNT(*) FROM catas WHERE muestra_id = $1)
                 + (SELECT COUNT(*) FROM catas_espirituosos WHERE muestra_id = $1)
            "#,
        )
        .bind(muestra_id)
        .fetch_one(&self.db)
        .await?;

        if cata_count > 0 {
            return Err(AppError::Conflict {
                resource: "muestra".to_string(),
                message: format!("Cannot delete sample: {} tasting sheets reference it", cata_count),
                message_es: format!(
                    "No se puede eliminar la muestra: {} fichas de cata la referencian",
                    cata_count
                ),
            });
        }

        let result = sqlx::query("DELETE FROM muestras WHERE id = $1")
            .bind(muestra_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Muestra".to_string()));
        }

        Ok(())
    }

    fn validate_codigo(codigo: &str) -> AppResult<()> {
        validate_codigo_muestra(codigo).map_err(|msg| AppError::Validation {
            field: "codigo".to_string(),
            message: msg.to_string(),
            message_es: "El código debe tener de 1 a 10 caracteres alfanuméricos".to_string(),
        })
    }

    fn validate_anada_field(anada: Option<i32>) -> AppResult<()> {
        if let Some(anada) = anada {
            validate_anada(anada).map_err(|msg| AppError::Validation {
                field: "anada".to_string(),
                message: msg.to_string(),
                message_es: "La añada debe estar entre 1900 y 2100".to_string(),
            })?;
        }
        Ok(())
    }
}
