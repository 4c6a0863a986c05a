//! Interactive chat and classify command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{info, warn};

use crate::agent::{
    AgentProfile, AppraisalRequest, CollectionAgent, MortgageApplication, PropertySearchFilters,
    TurnOutput,
};
use crate::config::ToctocConfig;
use crate::error::{ErrorCategory, Result};
use crate::models::OpenAiModel;
use crate::provider::ModelGateway;
use crate::router::{Intent, IntentRouter};
use crate::telemetry::Tracer;
use crate::valuation::ValuationClient;

use super::{ChatArgs, ClassifyArgs};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "salir"];

pub fn is_exit_word(line: &str) -> bool {
    let line = line.trim();
    EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Load configuration from `path` if given, otherwise from the environment.
pub fn load_config(path: Option<&Path>) -> Result<ToctocConfig> {
    match path {
        Some(path) => ToctocConfig::load(path),
        None => ToctocConfig::from_env(),
    }
}

/// Read the next non-blank line. `None` on end of input or an exit word.
pub async fn read_message<R, W>(lines: &mut Lines<R>, out: &mut W) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_word(line) {
            return Ok(None);
        }
        return Ok(Some(line.to_string()));
    }
}

/// Drive one agent until it completes or input runs out.
///
/// Malformed model replies are reported and the user is prompted again;
/// every other error ends the conversation.
pub async fn converse<T, R, W>(
    agent: &mut CollectionAgent<T>,
    first: String,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<Option<T>>
where
    T: DeserializeOwned + Serialize + Clone,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut next = Some(first);
    while let Some(message) = next {
        agent.add_user_message(message);
        match agent.run().await {
            Ok(turn) => match turn.output {
                TurnOutput::Reply(text) => {
                    out.write_all(format!("TocToc IA: {text}\n").as_bytes())
                        .await?;
                }
                TurnOutput::Completed { result, .. } => {
                    let pretty = serde_json::to_string_pretty(&result)?;
                    out.write_all(format!("{pretty}\n").as_bytes()).await?;
                    out.flush().await?;
                    return Ok(Some(result));
                }
            },
            Err(e) if e.category() == ErrorCategory::ModelContract => {
                warn!(error = %e, "model reply rejected");
                out.write_all(format!("Error: {e}\n").as_bytes()).await?;
            }
            Err(e) => return Err(e),
        }
        next = read_message(lines, out).await?;
    }
    Ok(None)
}

/// `toctoc chat`
pub async fn handle_chat(args: ChatArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let gateway = ModelGateway::from_config(&config, Tracer::logging(config.project.clone()))?;
    let mut settings = config.settings();
    if let Some(model) = &args.model {
        settings.model = OpenAiModel::from_id(model);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = tokio::io::stdout();
    out.write_all("TocToc IA: ¿En qué te puedo ayudar? (escribe 'salir' para terminar)\n".as_bytes())
        .await?;

    let Some(first) = read_message(&mut lines, &mut out).await? else {
        return Ok(());
    };

    let intent = match args.agent.intent() {
        Some(intent) => intent,
        None => {
            IntentRouter::new(gateway.clone())
                .with_settings(settings.clone())
                .route(&first)
                .await?
        }
    };
    info!(%intent, "starting agent");

    if args.appraise && intent != Intent::Tasar {
        warn!(%intent, "--appraise only applies to the appraisal agent");
    }

    let profile = AgentProfile::for_intent(intent);
    match intent {
        Intent::Busqueda => {
            let mut agent: CollectionAgent<PropertySearchFilters> =
                CollectionAgent::new(gateway, profile).with_settings(settings);
            converse(&mut agent, first, &mut lines, &mut out).await?;
        }
        Intent::Hipotecario => {
            let mut agent: CollectionAgent<MortgageApplication> =
                CollectionAgent::new(gateway, profile).with_settings(settings);
            converse(&mut agent, first, &mut lines, &mut out).await?;
        }
        Intent::Tasar => {
            let mut agent: CollectionAgent<AppraisalRequest> =
                CollectionAgent::new(gateway, profile).with_settings(settings);
            let collected = converse(&mut agent, first, &mut lines, &mut out).await?;
            if let (true, Some(request)) = (args.appraise, collected) {
                let client = ValuationClient::from_config(&config)?;
                let appraisal = client.get_sale_appraisal(&request.into()).await?;
                let pretty = serde_json::to_string_pretty(&appraisal)?;
                out.write_all(format!("{pretty}\n").as_bytes()).await?;
            }
        }
    }

    out.flush().await?;
    Ok(())
}

/// `toctoc classify`
pub async fn handle_classify(args: ClassifyArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let router = IntentRouter::new(ModelGateway::from_config(
        &config,
        Tracer::logging(config.project.clone()),
    )?)
    .with_settings(config.settings());

    let intent = if args.function_call {
        router.route(&args.message).await?
    } else {
        router.classify(&args.message).await?
    };
    println!("{intent}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_are_case_insensitive() {
        assert!(is_exit_word("salir"));
        assert!(is_exit_word("  QUIT "));
        assert!(is_exit_word("Exit"));
        assert!(!is_exit_word("salir de aquí"));
    }

    #[tokio::test]
    async fn read_message_skips_blank_lines_and_stops_on_exit() {
        let input: &[u8] = b"\n   \nhola\nsalir\nnunca\n";
        let mut lines = BufReader::new(input).lines();
        let mut out = Vec::new();

        assert_eq!(
            read_message(&mut lines, &mut out).await.unwrap(),
            Some("hola".to_string())
        );
        assert_eq!(read_message(&mut lines, &mut out).await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_message_returns_none_at_end_of_input() {
        let input: &[u8] = b"";
        let mut lines = BufReader::new(input).lines();
        let mut out = Vec::new();
        assert_eq!(read_message(&mut lines, &mut out).await.unwrap(), None);
        assert_eq!(out, b"> ");
    }
}
