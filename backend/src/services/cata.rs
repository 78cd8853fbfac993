//! Tasting sheet (cata) submission and lookup service
//!
//! Submitted totals are never trusted: the server re-derives the total and
//! the medal tier from the category selections it validated itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{FichaCata, FichaEspirituoso, FichaVino};
use shared::scoring::{Discipline, SpiritsScores, StillWineScores};
use shared::validation::{validate_catador_numero, validate_orden};

/// Service for recording and querying tasting sheets
#[derive(Clone)]
pub struct CataService {
    db: PgPool,
}

/// Submission payload, tagged by discipline like the stored record
#[derive(Debug, Deserialize)]
#[serde(tag = "disciplina")]
pub enum SubmitCataInput {
    #[serde(rename = "still_wine")]
    StillWine(SubmitStillWine),
    #[serde(rename = "spirits")]
    Spirits(SubmitSpirits),
}

#[derive(Debug, Deserialize)]
pub struct SubmitStillWine {
    pub muestra_id: Uuid,
    pub tanda_id: Option<Uuid>,
    pub catador_numero: i32,
    pub orden: i32,
    #[serde(flatten)]
    pub puntuaciones: StillWineScores,
    #[serde(default)]
    pub descartado: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSpirits {
    pub muestra_id: Uuid,
    pub tanda_id: Option<Uuid>,
    pub catador_numero: i32,
    pub orden: i32,
    #[serde(flatten)]
    pub puntuaciones: SpiritsScores,
    #[serde(default)]
    pub descartado: bool,
}

/// Stored sheet plus the derived medal label
#[derive(Debug, Serialize)]
pub struct CataResponse {
    #[serde(flatten)]
    pub ficha: FichaCata,
    pub medalla: Option<String>,
}

impl From<FichaCata> for CataResponse {
    fn from(ficha: FichaCata) -> Self {
        let medalla = ficha.medalla().map(|m| m.label().to_string());
        Self { ficha, medalla }
    }
}

/// Query filters for listing sheets
#[derive(Debug, Default, Deserialize)]
pub struct CataFilter {
    pub muestra_id: Option<Uuid>,
    pub tanda_id: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
struct FichaVinoRow {
    id: Uuid,
    muestra_id: Uuid,
    tanda_id: Option<Uuid>,
    catador_numero: i32,
    orden: i32,
    vista_aspecto: i32,
    olfato_intensidad: i32,
    olfato_calidad: i32,
    gusto_sabor: i32,
    armonia_final: i32,
    puntuacion_total: i32,
    descartado: bool,
    usuario_id: Uuid,
    fecha_registro: DateTime<Utc>,
}

impl From<FichaVinoRow> for FichaVino {
    fn from(row: FichaVinoRow) -> Self {
        FichaVino {
            id: row.id,
            muestra_id: row.muestra_id,
            tanda_id: row.tanda_id,
            catador_numero: row.catador_numero,
            orden: row.orden,
            puntuaciones: StillWineScores {
                vista_aspecto: row.vista_aspecto,
                olfato_intensidad: row.olfato_intensidad,
                olfato_calidad: row.olfato_calidad,
                gusto_sabor: row.gusto_sabor,
                armonia_final: row.armonia_final,
            },
            puntuacion_total: row.puntuacion_total,
            descartado: row.descartado,
            usuario_id: row.usuario_id,
            fecha_registro: row.fecha_registro,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FichaEspirituosoRow {
    id: Uuid,
    muestra_id: Uuid,
    tanda_id: Option<Uuid>,
    catador_numero: i32,
    orden: i32,
    vista_limpidez: i32,
    vista_color: i32,
    olfato_intensidad: i32,
    olfato_limpidez: i32,
    olfato_calidad: i32,
    sabor_tipicidad: i32,
    sabor_persistencia: i32,
    sabor_calidad: i32,
    juicio_global: i32,
    puntuacion_total: i32,
    descartado: bool,
    usuario_id: Uuid,
    fecha_registro: DateTime<Utc>,
}

impl From<FichaEspirituosoRow> for FichaEspirituoso {
    fn from(row: FichaEspirituosoRow) -> Self {
        FichaEspirituoso {
            id: row.id,
            muestra_id: row.muestra_id,
            tanda_id: row.tanda_id,
            catador_numero: row.catador_numero,
            orden: row.orden,
            puntuaciones: SpiritsScores {
                vista_limpidez: row.vista_limpidez,
                vista_color: row.vista_color,
                olfato_intensidad: row.olfato_intensidad,
                olfato_limpidez: row.olfato_limpidez,
                olfato_calidad: row.olfato_calidad,
                sabor_tipicidad: row.sabor_tipicidad,
                sabor_persistencia: row.sabor_persistencia,
                sabor_calidad: row.sabor_calidad,
                juicio_global: row.juicio_global,
            },
            puntuacion_total: row.puntuacion_total,
            descartado: row.descartado,
            usuario_id: row.usuario_id,
            fecha_registro: row.fecha_registro,
        }
    }
}

const VINO_COLUMNS: &str = "id, muestra_id, tanda_id, catador_numero, orden, \
    vista_aspecto, olfato_intensidad, olfato_calidad, gusto_sabor, armonia_final, \
    puntuacion_total, descartado, usuario_id, fecha_registro";

const ESPIRITUOSO_COLUMNS: &str = "id, muestra_id, tanda_id, catador_numero, orden, \
    vista_limpidez, vista_color, olfato_intensidad, olfato_limpidez, olfato_calidad, \
    sabor_tipicidad, sabor_persistencia, sabor_calidad, juicio_global, \
    puntuacion_total, descartado, usuario_id, fecha_registro";

impl CataService {
    /// Create a new CataService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a submitted sheet and return it with its derived medal
    pub async fn submit_cata(
        &self,
        usuario_id: Uuid,
        input: SubmitCataInput,
    ) -> AppResult<CataResponse> {
        match input {
            SubmitCataInput::StillWine(input) => self.submit_still_wine(usuario_id, input).await,
            SubmitCataInput::Spirits(input) => self.submit_spirits(usuario_id, input).await,
        }
    }

    async fn submit_still_wine(
        &self,
        usuario_id: Uuid,
        input: SubmitStillWine,
    ) -> AppResult<CataResponse> {
        Self::validate_common(input.catador_numero, input.orden)?;
        input.puntuaciones.validate()?;
        self.verify_references(input.muestra_id, input.tanda_id).await?;

        let total = input.puntuaciones.total();

        let row = sqlx::query_as::<_, FichaVinoRow>(&format!(
            r#"
            INSERT INTO catas (muestra_id, tanda_id, catador_numero, orden,
                               vista_aspecto, olfato_intensidad, olfato_calidad,
                               gusto_sabor, armonia_final,
                               puntuacion_total, descartado, usuario_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            VINO_COLUMNS
        ))
        .bind(input.muestra_id)
        .bind(input.tanda_id)
        .bind(input.catador_numero)
        .bind(input.orden)
        .bind(input.puntuaciones.vista_aspecto)
        .bind(input.puntuaciones.olfato_intensidad)
        .bind(input.puntuaciones.olfato_calidad)
        .bind(input.puntuaciones.gusto_sabor)
        .bind(input.puntuaciones.armonia_final)
        .bind(total)
        .bind(input.descartado)
        .bind(usuario_id)
        .fetch_one(&self.db)
        .await?;

        Ok(FichaCata::StillWine(row.into()).into())
    }

    async fn submit_spirits(
        &self,
        usuario_id: Uuid,
        input: SubmitSpirits,
    ) -> AppResult<CataResponse> {
        Self::validate_common(input.catador_numero, input.orden)?;
        input.puntuaciones.validate()?;
        self.verify_references(input.muestra_id, input.tanda_id).await?;

        let total = input.puntuaciones.total();

        let row = sqlx::query_as::<_, FichaEspirituosoRow>(&format!(
            r#"
            INSERT INTO catas_espirituosos (muestra_id, tanda_id, catador_numero, orden,
                               vista_limpidez, vista_color, olfato_intensidad,
                               olfato_limpidez, olfato_calidad, sabor_tipicidad,
                               sabor_persistencia, sabor_calidad, juicio_global,
                               puntuacion_total, descartado, usuario_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            ESPIRITUOSO_COLUMNS
        ))
        .bind(input.muestra_id)
        .bind(input.tanda_id)
        .bind(input.catador_numero)
        .bind(input.orden)
        .bind(input.puntuaciones.vista_limpidez)
        .bind(input.puntuaciones.vista_color)
        .bind(input.puntuaciones.olfato_intensidad)
        .bind(input.puntuaciones.olfato_limpidez)
        .bind(input.puntuaciones.olfato_calidad)
        .bind(input.puntuaciones.sabor_tipicidad)
        .bind(input.puntuaciones.sabor_persistencia)
        .bind(input.puntuaciones.sabor_calidad)
        .bind(input.puntuaciones.juicio_global)
        .bind(total)
        .bind(input.descartado)
        .bind(usuario_id)
        .fetch_one(&self.db)
        .await?;

        Ok(FichaCata::Spirits(row.into()).into())
    }

    /// Get one sheet by ID, searching both disciplines
    pub async fn get_cata(&self, cata_id: Uuid) -> AppResult<CataResponse> {
        let vino = sqlx::query_as::<_, FichaVinoRow>(&format!(
            "SELECT {} FROM catas WHERE id = $1",
            VINO_COLUMNS
        ))
        .bind(cata_id)
        .fetch_optional(&self.db)
        .await?;

        if let Some(row) = vino {
            return Ok(FichaCata::StillWine(row.into()).into());
        }

        let espirituoso = sqlx::query_as::<_, FichaEspirituosoRow>(&format!(
            "SELECT {} FROM catas_espirituosos WHERE id = $1",
            ESPIRITUOSO_COLUMNS
        ))
        .bind(cata_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cata".to_string()))?;

        Ok(FichaCata::Spirits(espirituoso.into()).into())
    }

    /// List sheets for one discipline, newest first
    pub async fn get_catas(
        &self,
        discipline: Discipline,
        filter: CataFilter,
    ) -> AppResult<Vec<CataResponse>> {
        let fichas = match discipline {
            Discipline::StillWine => {
                let rows = sqlx::query_as::<_, FichaVinoRow>(&format!(
                    r#"
                    SELECT {} FROM catas
                    WHERE ($1::uuid IS NULL OR muestra_id = $1)
                      AND ($2::uuid IS NULL OR tanda_id = $2)
                    ORDER BY fecha_registro DESC
                    "#,
                    VINO_COLUMNS
                ))
                .bind(filter.muestra_id)
                .bind(filter.tanda_id)
                .fetch_all(&self.db)
                .await?;

                rows.into_iter()
                    .map(|row| FichaCata::StillWine(row.into()))
                    .collect::<Vec<_>>()
            }
            Discipline::Spirits => {
                let rows = sqlx::query_as::<_, FichaEspirituosoRow>(&format!(
                    r#"
                    SELECT {} FROM catas_espirituosos
                    WHERE ($1::uuid IS NULL OR muestra_id = $1)
                      AND ($2::uuid IS NULL OR tanda_id = $2)
                    ORDER BY fecha_registro DESC
                    "#,
                    ESPIRITUOSO_COLUMNS
                ))
                .bind(filter.muestra_id)
                .bind(filter.tanda_id)
                .fetch_all(&self.db)
                .await?;

                rows.into_iter()
                    .map(|row| FichaCata::Spirits(row.into()))
                    .collect::<Vec<_>>()
            }
        };

        Ok(fichas.into_iter().map(CataResponse::from).collect())
    }

    fn validate_common(catador_numero: i32, orden: i32) -> AppResult<()> {
        validate_catador_numero(catador_numero).map_err(|msg| AppError::Validation {
            field: "catador_numero".to_string(),
            message: msg.to_string(),
            message_es: "El número de catador debe ser al menos 1".to_string(),
        })?;

        validate_orden(orden).map_err(|msg| AppError::Validation {
            field: "orden".to_string(),
            message: msg.to_string(),
            message_es: "El orden debe ser al menos 1".to_string(),
        })?;

        Ok(())
    }

    async fn verify_references(&self, muestra_id: Uuid, tanda_id: Option<Uuid>) -> AppResult<()> {
        let muestra_exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM muestras WHERE id = $1",
        )
        .bind(muestra_id)
        .fetch_one(&self.db)
        .await?;

        if muestra_exists == 0 {
            return Err(AppError::NotFound("Muestra".to_string()));
        }

        if let Some(tanda_id) = tanda_id {
            let tanda_exists = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM tandas WHERE id = $1",
            )
            .bind(tanda_id)
            .fetch_one(&self.db)
            .await?;

            if tanda_exists == 0 {
                return Err(AppError::NotFound("Tanda".to_string()));
            }
        }

        Ok(())
    }
}
