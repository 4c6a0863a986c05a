//! Intent router: decides which collection agent handles a conversation.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::error::Result;
use crate::provider::ModelGateway;
use crate::types::{FunctionSchema, GenerationSettings, Message};

/// The three specialized agents a conversation can be routed to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Intent {
    /// Looking for a property.
    #[default]
    Busqueda,
    /// Mortgage or financing questions.
    Hipotecario,
    /// Wants a property valued.
    Tasar,
}

impl Intent {
    /// Read an intent out of a classifier reply.
    ///
    /// The first word naming an intent wins; anything else is a search.
    pub fn from_reply(reply: &str) -> Self {
        let normalized = reply.to_uppercase().replace('Ú', "U");
        normalized
            .split(|c: char| !c.is_alphanumeric())
            .find_map(|token| token.parse().ok())
            .unwrap_or(Self::Busqueda)
    }

    /// Map a routing function name back to its intent.
    pub fn from_function_name(name: &str) -> Option<Self> {
        match name {
            SEARCH_FUNCTION => Some(Self::Busqueda),
            MORTGAGE_FUNCTION => Some(Self::Hipotecario),
            APPRAISAL_FUNCTION => Some(Self::Tasar),
            _ => None,
        }
    }
}

const SEARCH_FUNCTION: &str = "buscar_propiedades";
const MORTGAGE_FUNCTION: &str = "credito_hipotecario";
const APPRAISAL_FUNCTION: &str = "tasar_propiedad";

/// Classifier instruction for a given day.
pub fn classification_instruction(today: NaiveDate) -> String {
    format!(
        concat!(
            "Eres un agente de clasificación para una inmobiliaria. ",
            "Tu única tarea es analizar el mensaje inicial del usuario y determinar cuál de los ",
            "siguientes agentes especializados debe manejar la conversación:\n\n",
            "1. BUSQUEDA: si el usuario busca una propiedad o quiere información sobre propiedades disponibles.\n",
            "2. HIPOTECARIO: si el usuario tiene preguntas sobre créditos hipotecarios, financiamiento o préstamos para vivienda.\n",
            "3. TASAR: si el usuario quiere tasar, valuar o conocer el precio de una propiedad.\n\n",
            "Debes responder únicamente con una de estas tres palabras: BUSQUEDA, HIPOTECARIO o TASAR.\n\n",
            "Ejemplos:\n",
            "- \"Quiero comprar una casa\": BUSQUEDA\n",
            "- \"Necesito un crédito para mi casa\": HIPOTECARIO\n",
            "- \"¿Cuánto vale mi departamento?\": TASAR\n\n",
            "Si el mensaje es ambiguo o no se ajusta a ninguna categoría, responde BUSQUEDA. ",
            "Ten en cuenta la fecha, el país y el idioma de la conversación.\n",
            "Fecha actual: {weekday} {day} de {month} del {year}.\n",
            "País: Chile.\n",
            "Idioma: Español."
        ),
        weekday = weekday_es(today.weekday()),
        day = today.day(),
        month = month_es(today.month()),
        year = today.year(),
    )
}

fn weekday_es(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn month_es(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("enero")
}

/// Function catalog for [`IntentRouter::route`]. The search route comes
/// first so the gateway's no-selection fallback lands on it.
pub fn routing_functions() -> Vec<FunctionSchema> {
    let message_param = serde_json::json!({
        "type": "object",
        "properties": {
            "resumen": {
                "type": "string",
                "description": "Resumen breve de lo que pide el usuario"
            }
        }
    });
    vec![
        FunctionSchema::new(
            SEARCH_FUNCTION,
            "El usuario busca una propiedad o información sobre propiedades disponibles",
            message_param.clone(),
        ),
        FunctionSchema::new(
            MORTGAGE_FUNCTION,
            "El usuario pregunta por créditos hipotecarios, financiamiento o préstamos para vivienda",
            message_param.clone(),
        ),
        FunctionSchema::new(
            APPRAISAL_FUNCTION,
            "El usuario quiere tasar, valuar o conocer el precio de una propiedad",
            message_param,
        ),
    ]
}

/// Classifies a user's opening message.
#[derive(Clone)]
pub struct IntentRouter {
    gateway: ModelGateway,
    settings: GenerationSettings,
    today: Option<NaiveDate>,
}

impl IntentRouter {
    pub fn new(gateway: ModelGateway) -> Self {
        Self {
            gateway,
            settings: GenerationSettings::default(),
            today: None,
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Pin the date rendered into the instruction.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn history(&self, message: &str) -> [Message; 2] {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        [
            Message::system(classification_instruction(today)),
            Message::user(message),
        ]
    }

    /// Classify with a plain completion.
    pub async fn classify(&self, message: &str) -> Result<Intent> {
        let reply = self
            .gateway
            .completion(&self.history(message), &self.settings)
            .await?;
        let intent = Intent::from_reply(reply.content());
        debug!(%intent, reply = reply.content(), "classified message");
        Ok(intent)
    }

    /// Classify by letting the model pick a routing function.
    pub async fn route(&self, message: &str) -> Result<Intent> {
        let output = self
            .gateway
            .function_call(
                &self.history(message),
                &routing_functions(),
                &self.settings.for_function_call(),
            )
            .await?;

        let intent = Intent::from_function_name(&output.function_name).unwrap_or_else(|| {
            warn!(function = %output.function_name, "unknown routing function, defaulting to search");
            Intent::Busqueda
        });
        debug!(%intent, "routed message");
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_reply_is_case_insensitive_and_tolerates_accents() {
        assert_eq!(Intent::from_reply("TASAR"), Intent::Tasar);
        assert_eq!(Intent::from_reply("hipotecario\n"), Intent::Hipotecario);
        assert_eq!(Intent::from_reply("Búsqueda."), Intent::Busqueda);
        assert_eq!(Intent::from_reply("Respuesta: TASAR"), Intent::Tasar);
    }

    #[test]
    fn from_reply_defaults_to_search() {
        assert_eq!(Intent::from_reply("no estoy seguro"), Intent::Busqueda);
        assert_eq!(Intent::from_reply(""), Intent::Busqueda);
    }

    #[test]
    fn instruction_renders_spanish_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let text = classification_instruction(date);
        assert!(text.contains("Fecha actual: viernes 10 de enero del 2025."));
        assert!(text.contains("País: Chile."));
    }

    #[test]
    fn search_route_is_first() {
        let functions = routing_functions();
        assert_eq!(functions.len(), 3);
        assert_eq!(
            Intent::from_function_name(&functions[0].name),
            Some(Intent::Busqueda)
        );
        assert_eq!(Intent::from_function_name("otra"), None);
    }
}
