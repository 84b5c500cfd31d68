// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query dispatch: classify, extract, execute, stream.
//!
//! The [`Dispatcher`] owns one strategy per remote collaborator (chosen at
//! startup) and exposes the two entry points the transports need: a drained
//! single-shot form for request/response and a chunked form for streaming.
//! Every chunk sequence ends with exactly one [`AnswerChunk::End`].

use std::pin::Pin;
use std::sync::Arc;

use futures::future;
use futures::stream::{self, Stream, StreamExt};
use routier_core::{
    AnswerChunk, GenerationProvider, RouterError, TextDeltaStream, ToolKind, WeatherProvider,
};
use routier_intent::{extract_city, extract_expression};
use routier_mathexpr::{evaluate, MathError};
use tracing::{debug, info};

use crate::render;

/// An ordered chunk sequence for one query. Ends with [`AnswerChunk::End`].
pub type AnswerChunkStream = Pin<Box<dyn Stream<Item = AnswerChunk> + Send>>;

/// Result of the single-shot entry point.
///
/// Weather and generation failures are already rendered into the answer
/// text; only evaluator failures stay typed, so the HTTP layer can map
/// them to a client-error status.
#[derive(Debug)]
pub struct RoutedReply {
    /// Which tool answered.
    pub tool: ToolKind,
    /// The drained answer, or the math failure.
    pub result: Result<String, MathError>,
}

/// Result of the streaming entry point.
pub struct DispatchOutcome {
    /// Which tool is answering.
    pub tool: ToolKind,
    /// Fragments followed by exactly one terminal chunk.
    pub chunks: AnswerChunkStream,
}

/// Classifies queries and runs the selected tool.
///
/// Holds no per-query state; concurrent dispatches are independent.
pub struct Dispatcher {
    weather: Arc<dyn WeatherProvider>,
    generation: Arc<dyn GenerationProvider>,
    default_city: String,
    ascii_degrees: bool,
}

impl Dispatcher {
    /// Creates a dispatcher over the given strategies.
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        generation: Arc<dyn GenerationProvider>,
        default_city: String,
        ascii_degrees: bool,
    ) -> Self {
        Self {
            weather,
            generation,
            default_city,
            ascii_degrees,
        }
    }

    /// Single-shot entry point: classify, execute, drain.
    pub async fn respond(&self, query: &str) -> RoutedReply {
        let tool = routier_intent::classify(query);
        info!(tool = %tool, "query routed");

        let result = match tool {
            ToolKind::Weather => Ok(self.weather_answer(query).await),
            ToolKind::Math => {
                let expression = extract_expression(query);
                debug!(expression, "evaluating");
                evaluate(&expression)
            }
            ToolKind::Generation => Ok(match self.generation.complete(query).await {
                Ok(answer) => answer,
                Err(err) => format!("Generation request failed: {err}"),
            }),
        };

        RoutedReply { tool, result }
    }

    /// Streaming entry point: classify, execute, emit chunks.
    ///
    /// Weather and math answers arrive as a single fragment; generation
    /// answers stream their deltas as they arrive. Failures become
    /// substitute fragments, and the terminal chunk is always emitted.
    pub async fn dispatch(&self, query: &str) -> DispatchOutcome {
        let tool = routier_intent::classify(query);
        info!(tool = %tool, "query routed");

        let chunks = match tool {
            ToolKind::Weather => single_fragment(self.weather_answer(query).await),
            ToolKind::Math => {
                let expression = extract_expression(query);
                debug!(expression, "evaluating");
                let text = match evaluate(&expression) {
                    Ok(result) => result,
                    Err(err) => err.to_string(),
                };
                single_fragment(text)
            }
            ToolKind::Generation => match self.generation.stream(query).await {
                Ok(deltas) => generation_chunks(deltas),
                Err(err) => single_fragment(format!("[stream error] {err}")),
            },
        };

        DispatchOutcome { tool, chunks }
    }

    async fn weather_answer(&self, query: &str) -> String {
        let city = extract_city(query).unwrap_or_else(|| self.default_city.clone());
        debug!(city, provider = self.weather.name(), "fetching weather");
        match self.weather.current(&city).await {
            Ok(report) => render::render_weather(&report, self.ascii_degrees),
            Err(err) => render::render_weather_failure(&err, &city),
        }
    }
}

/// One fragment, then the terminal chunk.
fn single_fragment(text: String) -> AnswerChunkStream {
    Box::pin(stream::iter(vec![AnswerChunk::Fragment(text), AnswerChunk::End]))
}

/// Forwards deltas as fragments. The first delta error becomes a substitute
/// fragment and truncates the stream; the terminal chunk always follows.
fn generation_chunks(deltas: TextDeltaStream) -> AnswerChunkStream {
    let fragments = deltas.scan(false, |errored, item: Result<String, RouterError>| {
        if *errored {
            return future::ready(None);
        }
        let chunk = match item {
            Ok(text) => AnswerChunk::Fragment(text),
            Err(err) => {
                *errored = true;
                AnswerChunk::Fragment(format!("[stream error] {err}"))
            }
        };
        future::ready(Some(chunk))
    });

    Box::pin(fragments.chain(stream::once(future::ready(AnswerChunk::End))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use routier_core::WeatherReport;
    use routier_openai::MockGeneration;
    use routier_weather::MockWeather;

    fn mock_dispatcher() -> Dispatcher {
        Dispatcher::new(
            Arc::new(MockWeather),
            Arc::new(MockGeneration),
            "San Francisco".to_string(),
            false,
        )
    }

    async fn collect(outcome: DispatchOutcome) -> Vec<AnswerChunk> {
        outcome.chunks.collect().await
    }

    struct NotFoundWeather;

    #[async_trait]
    impl WeatherProvider for NotFoundWeather {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn current(&self, city: &str) -> Result<WeatherReport, RouterError> {
            Err(RouterError::CityNotFound {
                city: city.to_string(),
            })
        }
    }

    struct BrokenStreamGeneration;

    #[async_trait]
    impl GenerationProvider for BrokenStreamGeneration {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, RouterError> {
            Ok("unused".to_string())
        }

        async fn stream(&self, _prompt: &str) -> Result<TextDeltaStream, RouterError> {
            Ok(Box::pin(stream::iter(vec![
                Ok("partial ".to_string()),
                Err(RouterError::RemoteUnavailable {
                    provider: "openai",
                    message: "connection reset".into(),
                    source: None,
                }),
                Ok("never delivered".to_string()),
            ])))
        }
    }

    #[tokio::test]
    async fn weather_reply_uses_the_extracted_city() {
        let reply = mock_dispatcher().respond("What's the weather in Paris?").await;
        assert_eq!(reply.tool, ToolKind::Weather);
        assert_eq!(
            reply.result.unwrap(),
            "It's 24°C and sunny in Paris. (mocked)"
        );
    }

    #[tokio::test]
    async fn weather_reply_falls_back_to_the_default_city() {
        let reply = mock_dispatcher().respond("will it rain tomorrow?").await;
        assert_eq!(reply.tool, ToolKind::Weather);
        assert_eq!(
            reply.result.unwrap(),
            "It's 24°C and sunny in San Francisco. (mocked)"
        );
    }

    #[tokio::test]
    async fn math_reply_is_the_formatted_number() {
        let reply = mock_dispatcher().respond("What is 6 * 7?").await;
        assert_eq!(reply.tool, ToolKind::Math);
        assert_eq!(reply.result.unwrap(), "42");
    }

    #[tokio::test]
    async fn math_failure_stays_typed_for_the_http_layer() {
        let reply = mock_dispatcher().respond("what is 2 +").await;
        assert_eq!(reply.tool, ToolKind::Math);
        assert!(matches!(reply.result, Err(MathError::Parse(_))));
    }

    #[tokio::test]
    async fn generation_reply_comes_from_the_provider() {
        let reply = mock_dispatcher()
            .respond("Who is the president of France?")
            .await;
        assert_eq!(reply.tool, ToolKind::Generation);
        let answer = reply.result.unwrap();
        assert!(answer.contains("Who is the president of France?"));
        assert!(answer.starts_with("[mocked generation]"));
    }

    #[tokio::test]
    async fn weather_dispatch_is_one_fragment_then_end() {
        let outcome = mock_dispatcher().dispatch("weather in Oslo").await;
        assert_eq!(outcome.tool, ToolKind::Weather);
        let chunks = collect(outcome).await;
        assert_eq!(
            chunks,
            vec![
                AnswerChunk::Fragment("It's 24°C and sunny in Oslo. (mocked)".to_string()),
                AnswerChunk::End,
            ]
        );
    }

    #[tokio::test]
    async fn math_error_renders_as_a_fragment_on_the_streaming_path() {
        let outcome = mock_dispatcher().dispatch("calculate 5 / 0").await;
        assert_eq!(outcome.tool, ToolKind::Math);
        let chunks = collect(outcome).await;
        assert_eq!(
            chunks,
            vec![
                AnswerChunk::Fragment("division by zero".to_string()),
                AnswerChunk::End,
            ]
        );
    }

    #[tokio::test]
    async fn generation_dispatch_streams_fragments_then_end() {
        let dispatcher = mock_dispatcher();
        let full = match dispatcher.respond("Tell me about rust").await.result {
            Ok(text) => text,
            Err(err) => panic!("unexpected math error: {err}"),
        };

        let outcome = dispatcher.dispatch("Tell me about rust").await;
        assert_eq!(outcome.tool, ToolKind::Generation);
        let chunks = collect(outcome).await;

        assert!(chunks.len() > 2, "mock answer should stream in pieces");
        assert_eq!(chunks.last(), Some(&AnswerChunk::End));
        let rejoined: String = chunks
            .iter()
            .filter_map(|c| match c {
                AnswerChunk::Fragment(text) => Some(text.as_str()),
                AnswerChunk::End => None,
            })
            .collect();
        assert_eq!(rejoined, full);
    }

    #[tokio::test]
    async fn mid_stream_error_truncates_with_a_substitute_fragment() {
        let dispatcher = Dispatcher::new(
            Arc::new(MockWeather),
            Arc::new(BrokenStreamGeneration),
            "San Francisco".to_string(),
            false,
        );
        let chunks = collect(dispatcher.dispatch("tell me something").await).await;
        assert_eq!(
            chunks,
            vec![
                AnswerChunk::Fragment("partial ".to_string()),
                AnswerChunk::Fragment(
                    "[stream error] openai unavailable: connection reset".to_string()
                ),
                AnswerChunk::End,
            ]
        );
    }

    #[tokio::test]
    async fn unknown_city_renders_the_lookup_failure() {
        let dispatcher = Dispatcher::new(
            Arc::new(NotFoundWeather),
            Arc::new(MockGeneration),
            "San Francisco".to_string(),
            false,
        );
        let reply = dispatcher.respond("weather in Atlantis").await;
        assert_eq!(
            reply.result.unwrap(),
            "Weather lookup failed: city 'Atlantis' not found."
        );
    }

    #[tokio::test]
    async fn ascii_degrees_flows_through_to_the_rendering() {
        let dispatcher = Dispatcher::new(
            Arc::new(MockWeather),
            Arc::new(MockGeneration),
            "San Francisco".to_string(),
            true,
        );
        let reply = dispatcher.respond("weather in Paris").await;
        assert_eq!(
            reply.result.unwrap(),
            "It's 24degC and sunny in Paris. (mocked)"
        );
    }

    #[tokio::test]
    async fn every_chunk_sequence_has_exactly_one_terminal_marker() {
        let dispatcher = mock_dispatcher();
        for query in [
            "weather in Lima",
            "what is 2 + 2",
            "who wrote Dune?",
            "",
        ] {
            let chunks = collect(dispatcher.dispatch(query).await).await;
            let ends = chunks.iter().filter(|c| **c == AnswerChunk::End).count();
            assert_eq!(ends, 1, "query {query:?} should end exactly once");
            assert_eq!(
                chunks.last(),
                Some(&AnswerChunk::End),
                "query {query:?} should end last"
            );
        }
    }
}
