//! WebAssembly module for the Vinisima Tasting Management Platform
//!
//! Client-side computation for the browser tasting stations:
//! - Score totals and medal classification
//! - Category scale tables for the entry grid
//! - The station submission protocol (stations keep their entered values
//!   while a create-record call is in flight or being retried)
//! - Session state with sign-in/sign-out listeners

use wasm_bindgen::prelude::*;

use shared::scoring::{
    scale_table, tier_label, Discipline, SpiritsCategory, SpiritsScores, SpiritsSheet,
    StillWineCategory, StillWineScores, StillWineSheet,
};
use shared::session::{ActorIdentity, SessionContext, SubscriptionId};
use shared::station::TastingStation;
use uuid::Uuid;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_uuid(value: &str, field: &str) -> Result<Uuid, JsValue> {
    Uuid::parse_str(value).map_err(|_| JsValue::from_str(&format!("{field} is not a valid UUID")))
}

/// Total a still wine sheet from its wire JSON, rejecting off-scale values
#[wasm_bindgen]
pub fn calcular_total_vino(puntuaciones_json: &str) -> Result<i32, JsValue> {
    let scores: StillWineScores = serde_json::from_str(puntuaciones_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid scores JSON: {}", e)))?;
    scores.validate().map_err(js_err)?;
    Ok(scores.total())
}

/// Total a spirits sheet from its wire JSON, rejecting off-scale values
#[wasm_bindgen]
pub fn calcular_total_espirituoso(puntuaciones_json: &str) -> Result<i32, JsValue> {
    let scores: SpiritsScores = serde_json::from_str(puntuaciones_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid scores JSON: {}", e)))?;
    scores.validate().map_err(js_err)?;
    Ok(scores.total())
}

/// Medal label for a still wine total; empty below the medal floor
#[wasm_bindgen]
pub fn clasificar_vino(total: i32) -> String {
    tier_label(Discipline::StillWine, total).to_string()
}

/// Medal label for a spirits total; empty below the medal floor
#[wasm_bindgen]
pub fn clasificar_espirituoso(total: i32) -> String {
    tier_label(Discipline::Spirits, total).to_string()
}

#[wasm_bindgen]
pub fn puntuacion_maxima_vino() -> i32 {
    Discipline::StillWine.maximum_total()
}

#[wasm_bindgen]
pub fn puntuacion_maxima_espirituoso() -> i32 {
    Discipline::Spirits.maximum_total()
}

/// Still wine scale table as JSON, in entry order, for form rendering
#[wasm_bindgen]
pub fn tabla_categorias_vino() -> Result<String, JsValue> {
    serde_json::to_string(&scale_table(Discipline::StillWine)).map_err(js_err)
}

/// Spirits scale table as JSON, in entry order, for form rendering
#[wasm_bindgen]
pub fn tabla_categorias_espirituoso() -> Result<String, JsValue> {
    serde_json::to_string(&scale_table(Discipline::Spirits)).map_err(js_err)
}

/// Handle for detaching a session listener registered from JavaScript
#[wasm_bindgen]
pub struct Suscripcion {
    id: SubscriptionId,
}

/// Session state of one tasting station.
///
/// The current actor lives here, owned by the station UI. Listeners are
/// JavaScript functions called with the actor's JSON on sign-in and with
/// `null` on sign-out.
#[wasm_bindgen]
#[derive(Default)]
pub struct SesionCatador {
    inner: SessionContext,
}

#[wasm_bindgen]
impl SesionCatador {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SesionCatador {
        SesionCatador::default()
    }

    /// Sign in from an `ActorIdentity` JSON payload
    pub fn iniciar_sesion(&mut self, actor_json: &str) -> Result<(), JsValue> {
        let actor: ActorIdentity = serde_json::from_str(actor_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid actor JSON: {}", e)))?;
        self.inner.sign_in(actor);
        Ok(())
    }

    pub fn cerrar_sesion(&mut self) {
        self.inner.sign_out();
    }

    pub fn esta_autenticado(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// Current actor as JSON, or `None` when signed out
    pub fn actor_actual(&self) -> Option<String> {
        self.inner
            .current()
            .and_then(|actor| serde_json::to_string(actor).ok())
    }

    /// Register a listener for sign-in and sign-out changes
    pub fn suscribir(&mut self, callback: js_sys::Function) -> Suscripcion {
        let id = self.inner.subscribe(move |actor| {
            let arg = actor
                .and_then(|a| serde_json::to_string(a).ok())
                .map_or(JsValue::NULL, |json| JsValue::from_str(&json));
            let _ = callback.call1(&JsValue::NULL, &arg);
        });
        Suscripcion { id }
    }

    /// Detach a listener. Returns false when it was already detached.
    pub fn desuscribir(&mut self, suscripcion: Suscripcion) -> bool {
        self.inner.unsubscribe(suscripcion.id)
    }

    fn actor_id(&self) -> Option<Uuid> {
        self.inner.current().map(|actor| actor.usuario_id)
    }
}

/// Tasting station for the still wine discipline
#[wasm_bindgen]
pub struct EstacionVino {
    inner: TastingStation<StillWineSheet>,
}

#[wasm_bindgen]
impl EstacionVino {
    #[wasm_bindgen(constructor)]
    pub fn new(catador_numero: i32) -> EstacionVino {
        EstacionVino {
            inner: TastingStation::new(catador_numero),
        }
    }

    pub fn fase(&self) -> String {
        self.inner.phase().as_str().to_string()
    }

    pub fn orden(&self) -> i32 {
        self.inner.orden()
    }

    pub fn seleccionar_muestra(
        &mut self,
        muestra_id: &str,
        codigo: Option<String>,
    ) -> Result<(), JsValue> {
        let muestra_id = parse_uuid(muestra_id, "muestra_id")?;
        self.inner.select_muestra(muestra_id, codigo).map_err(js_err)
    }

    pub fn seleccionar_tanda(&mut self, tanda_id: Option<String>) -> Result<(), JsValue> {
        let tanda_id = match tanda_id {
            Some(raw) => Some(parse_uuid(&raw, "tanda_id")?),
            None => None,
        };
        self.inner.select_tanda(tanda_id).map_err(js_err)
    }

    pub fn fijar_catador(&mut self, catador_numero: i32) -> Result<(), JsValue> {
        self.inner.set_catador_numero(catador_numero).map_err(js_err)
    }

    /// Select a value for a category by its scale key
    pub fn puntuar(&mut self, categoria: &str, valor: u8) -> Result<(), JsValue> {
        let category = StillWineCategory::from_key(categoria)
            .ok_or_else(|| JsValue::from_str(&format!("unknown category: {categoria}")))?;
        self.inner.score(category, valor).map_err(js_err)
    }

    pub fn borrar_puntuacion(&mut self, categoria: &str) -> Result<(), JsValue> {
        let category = StillWineCategory::from_key(categoria)
            .ok_or_else(|| JsValue::from_str(&format!("unknown category: {categoria}")))?;
        self.inner.clear_score(category).map_err(js_err)
    }

    pub fn total(&self) -> i32 {
        self.inner.total()
    }

    pub fn medalla(&self) -> Option<String> {
        self.inner.medal().map(|medal| medal.label().to_string())
    }

    /// Start a submission (or a discard) and lock the station. Returns the
    /// draft record as JSON for the create-record call.
    pub fn iniciar_envio(
        &mut self,
        descartado: bool,
        sesion: &SesionCatador,
    ) -> Result<String, JsValue> {
        let draft = self
            .inner
            .begin_submit(descartado, sesion.actor_id())
            .map_err(js_err)?;
        serde_json::to_string(&draft).map_err(js_err)
    }

    /// The store acknowledged the record: clears the sheet and returns the
    /// next orden
    pub fn confirmar_envio(&mut self) -> Result<i32, JsValue> {
        self.inner.complete_submit().map_err(js_err)
    }

    /// The store rejected the record: unlocks with every value intact
    pub fn fallo_envio(&mut self) -> Result<(), JsValue> {
        self.inner.fail_submit().map_err(js_err)
    }
}

/// Tasting station for the spirits / fortified discipline
#[wasm_bindgen]
pub struct EstacionEspirituoso {
    inner: TastingStation<SpiritsSheet>,
}

#[wasm_bindgen]
impl EstacionEspirituoso {
    #[wasm_bindgen(constructor)]
    pub fn new(catador_numero: i32) -> EstacionEspirituoso {
        EstacionEspirituoso {
            inner: TastingStation::new(catador_numero),
        }
    }

    pub fn fase(&self) -> String {
        self.inner.phase().as_str().to_string()
    }

    pub fn orden(&self) -> i32 {
        self.inner.orden()
    }

    pub fn seleccionar_muestra(
        &mut self,
        muestra_id: &str,
        codigo: Option<String>,
    ) -> Result<(), JsValue> {
        let muestra_id = parse_uuid(muestra_id, "muestra_id")?;
        self.inner.select_muestra(muestra_id, codigo).map_err(js_err)
    }

    pub fn seleccionar_tanda(&mut self, tanda_id: Option<String>) -> Result<(), JsValue> {
        let tanda_id = match tanda_id {
            Some(raw) => Some(parse_uuid(&raw, "tanda_id")?),
            None => None,
        };
        self.inner.select_tanda(tanda_id).map_err(js_err)
    }

    pub fn fijar_catador(&mut self, catador_numero: i32) -> Result<(), JsValue> {
        self.inner.set_catador_numero(catador_numero).map_err(js_err)
    }

    /// Select a value for a category by its scale key
    pub fn puntuar(&mut self, categoria: &str, valor: u8) -> Result<(), JsValue> {
        let category = SpiritsCategory::from_key(categoria)
            .ok_or_else(|| JsValue::from_str(&format!("unknown category: {categoria}")))?;
        self.inner.score(category, valor).map_err(js_err)
    }

    pub fn borrar_puntuacion(&mut self, categoria: &str) -> Result<(), JsValue> {
        let category = SpiritsCategory::from_key(categoria)
            .ok_or_else(|| JsValue::from_str(&format!("unknown category: {categoria}")))?;
        self.inner.clear_score(category).map_err(js_err)
    }

    pub fn total(&self) -> i32 {
        self.inner.total()
    }

    pub fn medalla(&self) -> Option<String> {
        self.inner.medal().map(|medal| medal.label().to_string())
    }

    pub fn iniciar_envio(
        &mut self,
        descartado: bool,
        sesion: &SesionCatador,
    ) -> Result<String, JsValue> {
        let draft = self
            .inner
            .begin_submit(descartado, sesion.actor_id())
            .map_err(js_err)?;
        serde_json::to_string(&draft).map_err(js_err)
    }

    pub fn confirmar_envio(&mut self) -> Result<i32, JsValue> {
        self.inner.complete_submit().map_err(js_err)
    }

    pub fn fallo_envio(&mut self) -> Result<(), JsValue> {
        self.inner.fail_submit().map_err(js_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_vino_from_wire_json() {
        let json = r#"{
            "vista_aspecto": 12,
            "olfato_intensidad": 12,
            "olfato_calidad": 17,
            "gusto_sabor": 21,
            "armonia_final": 21
        }"#;
        assert_eq!(calcular_total_vino(json).unwrap(), 83);
    }

    #[test]
    fn test_total_espirituoso_treats_zero_as_unjudged() {
        let json = r#"{
            "vista_limpidez": 5,
            "vista_color": 0,
            "olfato_intensidad": 7,
            "olfato_limpidez": 0,
            "olfato_calidad": 13,
            "sabor_tipicidad": 6,
            "sabor_persistencia": 8,
            "sabor_calidad": 14,
            "juicio_global": 14
        }"#;
        assert_eq!(calcular_total_espirituoso(json).unwrap(), 67);
    }

    #[test]
    fn test_medal_labels() {
        assert_eq!(clasificar_vino(100), "GRAN ORO 94-100");
        assert_eq!(clasificar_vino(94), "GRAN ORO 94-100");
        assert_eq!(clasificar_vino(93), "90-93 ORO");
        assert_eq!(clasificar_espirituoso(90), "90-93 ORO");
        assert_eq!(clasificar_espirituoso(87), "87-89 PLATA");
        assert_eq!(clasificar_espirituoso(86), "");
    }

    #[test]
    fn test_maximum_totals() {
        assert_eq!(puntuacion_maxima_vino(), 100);
        assert_eq!(puntuacion_maxima_espirituoso(), 100);
    }

    #[test]
    fn test_scale_tables_in_entry_order() {
        let vino: Vec<serde_json::Value> =
            serde_json::from_str(&tabla_categorias_vino().unwrap()).unwrap();
        assert_eq!(vino.len(), 5);
        assert_eq!(vino[0]["key"], "vista_aspecto");
        assert_eq!(vino[3]["key"], "gusto_sabor");

        let espirituoso: Vec<serde_json::Value> =
            serde_json::from_str(&tabla_categorias_espirituoso().unwrap()).unwrap();
        assert_eq!(espirituoso.len(), 9);
        assert_eq!(espirituoso[8]["key"], "juicio_global");
    }

    #[test]
    fn test_station_submission_flow() {
        let mut sesion = SesionCatador::new();
        sesion
            .iniciar_sesion(&format!(
                r#"{{"usuario_id":"{}","email":"catador@vinisima.test","nombre":null}}"#,
                Uuid::new_v4()
            ))
            .unwrap();
        assert!(sesion.esta_autenticado());

        let mut estacion = EstacionVino::new(12);
        estacion
            .seleccionar_muestra(&Uuid::new_v4().to_string(), Some("4975".to_string()))
            .unwrap();
        estacion.puntuar("vista_aspecto", 15).unwrap();
        estacion.puntuar("olfato_intensidad", 15).unwrap();
        estacion.puntuar("olfato_calidad", 20).unwrap();
        estacion.puntuar("gusto_sabor", 25).unwrap();
        estacion.puntuar("armonia_final", 21).unwrap();
        assert_eq!(estacion.total(), 96);
        assert_eq!(estacion.medalla().as_deref(), Some("GRAN ORO 94-100"));

        let draft = estacion.iniciar_envio(false, &sesion).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&draft).unwrap();
        assert_eq!(parsed["puntuacion_total"], 96);
        assert_eq!(parsed["orden"], 1);
        assert_eq!(parsed["descartado"], false);
        assert_eq!(estacion.fase(), "submitting");

        assert_eq!(estacion.confirmar_envio().unwrap(), 2);
        assert_eq!(estacion.fase(), "editing");
        assert_eq!(estacion.total(), 0);
    }

    #[test]
    fn test_failed_submission_keeps_sheet() {
        let mut sesion = SesionCatador::new();
        sesion
            .iniciar_sesion(&format!(
                r#"{{"usuario_id":"{}","email":"catador@vinisima.test","nombre":"Ana"}}"#,
                Uuid::new_v4()
            ))
            .unwrap();

        let mut estacion = EstacionEspirituoso::new(3);
        estacion
            .seleccionar_muestra(&Uuid::new_v4().to_string(), None)
            .unwrap();
        estacion.puntuar("sabor_calidad", 18).unwrap();

        estacion.iniciar_envio(false, &sesion).unwrap();
        estacion.fallo_envio().unwrap();
        assert_eq!(estacion.orden(), 1);
        assert_eq!(estacion.total(), 18);
    }
}
