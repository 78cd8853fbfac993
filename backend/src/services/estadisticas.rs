//! Statistics and results export service
//!
//! Discarded sheets stay in the tables but never count towards any
//! aggregate here. Cross-discipline numbers union both sheet tables.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use shared::scoring::{classify_total, Discipline};

/// Statistics service
#[derive(Clone)]
pub struct EstadisticasService {
    db: PgPool,
}

/// Both sheet tables flattened to the fields shared aggregates need
const CATAS_UNION: &str = r#"
    SELECT muestra_id, tanda_id, puntuacion_total, descartado, 'still_wine' AS disciplina
    FROM catas
    UNION ALL
    SELECT muestra_id, tanda_id, puntuacion_total, descartado, 'spirits' AS disciplina
    FROM catas_espirituosos
"#;

/// High-level dashboard numbers
#[derive(Debug, Serialize)]
pub struct ResumenEstadisticas {
    pub total_muestras: i64,
    pub total_tandas: i64,
    pub total_catadores: i64,
    pub total_mesas: i64,
    pub total_catas: i64,
    pub catas_descartadas: i64,
    pub puntuacion_media: Option<Decimal>,
    pub gran_oro: i64,
    pub oro: i64,
    pub plata: i64,
}

/// Per-sample-type aggregate
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EstadisticaPorTipo {
    pub tipo: String,
    pub total_muestras: i64,
    pub total_catas: i64,
    pub puntuacion_media: Option<Decimal>,
}

/// Top sample by average score
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopMuestra {
    pub muestra_id: Uuid,
    pub codigo: String,
    pub nombre: String,
    pub total_catas: i64,
    pub puntuacion_media: Option<Decimal>,
}

/// Average selection per scoring phase of one discipline
#[derive(Debug, Serialize)]
pub struct EstadisticasFases {
    pub disciplina: Discipline,
    pub fases: Vec<FaseMedia>,
}

#[derive(Debug, Serialize)]
pub struct FaseMedia {
    pub categoria: String,
    pub media: Option<Decimal>,
}

/// One exportable results row: a sample's outcome within a round
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ResultadoRow {
    pub tanda: String,
    pub codigo: String,
    pub muestra: String,
    pub disciplina: String,
    pub catas: i64,
    pub puntuacion_media: Option<Decimal>,
    #[sqlx(default)]
    pub medalla: String,
}

/// Query filters for the results listing
#[derive(Debug, Default, Deserialize)]
pub struct ResultadosFilter {
    pub tanda_id: Option<Uuid>,
}

impl EstadisticasService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Dashboard summary across both disciplines
    pub async fn get_resumen(&self) -> AppResult<ResumenEstadisticas> {
        let entity_counts: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM muestras),
                (SELECT COUNT(*) FROM tandas),
                (SELECT COUNT(*) FROM catadores),
                (SELECT COUNT(*) FROM mesas)
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let cata_stats: (i64, i64, Option<Decimal>, i64, i64, i64) = sqlx::query_as(&format!(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE NOT descartado),
                COUNT(*) FILTER (WHERE descartado),
                AVG(puntuacion_total) FILTER (WHERE NOT descartado),
                COUNT(*) FILTER (WHERE NOT descartado AND puntuacion_total >= 94),
                COUNT(*) FILTER (WHERE NOT descartado AND puntuacion_total BETWEEN 90 AND 93),
                COUNT(*) FILTER (WHERE NOT descartado AND puntuacion_total BETWEEN 87 AND 89)
            FROM ({}) c
            "#,
            CATAS_UNION
        ))
        .fetch_one(&self.db)
        .await?;

        Ok(ResumenEstadisticas {
            total_muestras: entity_counts.0,
            total_tandas: entity_counts.1,
            total_catadores: entity_counts.2,
            total_mesas: entity_counts.3,
            total_catas: cata_stats.0,
            catas_descartadas: cata_stats.1,
            puntuacion_media: cata_stats.2,
            gran_oro: cata_stats.3,
            oro: cata_stats.4,
            plata: cata_stats.5,
        })
    }

    /// Aggregates grouped by the sample's declared type
    pub async fn get_por_tipo(&self) -> AppResult<Vec<EstadisticaPorTipo>> {
        let rows = sqlx::query_as::<_, EstadisticaPorTipo>(&format!(
            r#"
            SELECT
                COALESCE(m.tipo, 'sin tipo') AS tipo,
                COUNT(DISTINCT m.id) AS total_muestras,
                COUNT(c.muestra_id) AS total_catas,
                AVG(c.puntuacion_total) AS puntuacion_media
            FROM muestras m
            LEFT JOIN ({}) c ON c.muestra_id = m.id AND NOT c.descartado
            GROUP BY COALESCE(m.tipo, 'sin tipo')
            ORDER BY total_catas DESC, tipo ASC
            "#,
            CATAS_UNION
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// The five best-scoring samples
    pub async fn get_top_muestras(&self) -> AppResult<Vec<TopMuestra>> {
        let rows = sqlx::query_as::<_, TopMuestra>(&format!(
            r#"
            SELECT
                m.id AS muestra_id,
                m.codigo,
                m.nombre,
                COUNT(c.muestra_id) AS total_catas,
                AVG(c.puntuacion_total) AS puntuacion_media
            FROM muestras m
            JOIN ({}) c ON c.muestra_id = m.id AND NOT c.descartado
            GROUP BY m.id, m.codigo, m.nombre
            ORDER BY puntuacion_media DESC
            LIMIT 5
            "#,
            CATAS_UNION
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Average selected value per category for one discipline
    pub async fn get_fases(&self, discipline: Discipline) -> AppResult<EstadisticasFases> {
        // NULLIF keeps unjudged zeros out of the averages
        let (table, categorias): (&str, &[&str]) = match discipline {
            Discipline::StillWine => (
                "catas",
                &[
                    "vista_aspecto",
                    "olfato_intensidad",
                    "olfato_calidad",
                    "gusto_sabor",
                    "armonia_final",
                ],
            ),
            Discipline::Spirits => (
                "catas_espirituosos",
                &[
                    "vista_limpidez",
                    "vista_color",
                    "olfato_intensidad",
                    "olfato_limpidez",
                    "olfato_calidad",
                    "sabor_tipicidad",
                    "sabor_persistencia",
                    "sabor_calidad",
                    "juicio_global",
                ],
            ),
        };

        let mut fases = Vec::with_capacity(categorias.len());
        for categoria in categorias {
            let media: Option<Decimal> = sqlx::query_scalar(&format!(
                "SELECT AVG(NULLIF({col}, 0)) FROM {table} WHERE NOT descartado",
                col = categoria,
                table = table
            ))
            .fetch_one(&self.db)
            .await?;

            fases.push(FaseMedia {
                categoria: categoria.to_string(),
                media,
            });
        }

        Ok(EstadisticasFases {
            disciplina: discipline,
            fases,
        })
    }

    /// Results listing: per round and sample, both disciplines
    pub async fn get_resultados(&self, filter: &ResultadosFilter) -> AppResult<Vec<ResultadoRow>> {
        let mut rows = sqlx::query_as::<_, ResultadoRow>(&format!(
            r#"
            SELECT
                t.nombre AS tanda,
                m.codigo,
                m.nombre AS muestra,
                c.disciplina,
                COUNT(*) AS catas,
                AVG(c.puntuacion_total) AS puntuacion_media
            FROM ({}) c
            JOIN tandas t ON t.id = c.tanda_id
            JOIN muestras m ON m.id = c.muestra_id
            WHERE NOT c.descartado
              AND ($1::uuid IS NULL OR c.tanda_id = $1)
            GROUP BY t.nombre, m.codigo, m.nombre, c.disciplina
            ORDER BY t.nombre ASC, puntuacion_media DESC
            "#,
            CATAS_UNION
        ))
        .bind(filter.tanda_id)
        .fetch_all(&self.db)
        .await?;

        for row in &mut rows {
            row.medalla = Self::medalla_for(&row.disciplina, row.puntuacion_media);
        }

        Ok(rows)
    }

    fn medalla_for(disciplina: &str, media: Option<Decimal>) -> String {
        let discipline = if disciplina == "spirits" {
            Discipline::Spirits
        } else {
            Discipline::StillWine
        };
        media
            .and_then(|m| m.trunc().to_i32())
            .and_then(|total| classify_total(discipline, total))
            .map(|medal| medal.label().to_string())
            .unwrap_or_default()
    }

    /// Export a results listing as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                crate::error::AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            crate::error::AppError::Internal(format!("CSV writer error: {}", e))
        })?)
        .map_err(|e| crate::error::AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
