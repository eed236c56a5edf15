use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Local;
use netscope_core::{Effect, Facet, FacetData, Msg, ScrapeResult};
use netscope_engine::{
    EngineEvent, EngineEvents, EngineHandle, FacetValue, ReqwestScrapeClient, ScrapeDocument,
    ScrapeSettings, Ticker,
};
use netscope_logging::{ns_debug, ns_error, ns_info, ns_warn};

/// Wakes the UI after a message was queued from another thread.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// Executes core effects. Owns the engine and, while loading, the ticker;
/// dropping the runner stops both.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    notify: Notify,
    loading_interval: Duration,
    ticker: Option<Ticker>,
}

impl EffectRunner {
    pub fn new(
        settings: ScrapeSettings,
        loading_interval: Duration,
        msg_tx: mpsc::Sender<Msg>,
        notify: Notify,
    ) -> anyhow::Result<Self> {
        let client = ReqwestScrapeClient::new(settings)?;
        ns_info!("Scrape service: {}", client.settings().base_url);
        let (engine, events) = EngineHandle::spawn(Arc::new(client))?;
        spawn_event_loop(events, msg_tx.clone(), notify.clone())?;

        Ok(Self {
            engine,
            msg_tx,
            notify,
            loading_interval,
            ticker: None,
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchScrape { request_id, url } => {
                    ns_info!("FetchScrape request_id={} url_len={}", request_id, url.len());
                    if let Err(err) = self.engine.scrape(request_id, url) {
                        ns_error!("Scrape {} not queued: {}", request_id, err);
                        if self.msg_tx.send(Msg::FetchFailed { request_id }).is_ok() {
                            (self.notify)();
                        }
                    }
                }
                Effect::StartLoadingTicker => self.start_ticker(),
                Effect::StopLoadingTicker => self.stop_ticker(),
            }
        }
    }

    fn start_ticker(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        let msg_tx = self.msg_tx.clone();
        let notify = self.notify.clone();
        let started = Ticker::start(self.loading_interval, move || {
            if msg_tx.send(Msg::LoadingTick).is_ok() {
                notify();
            }
        });
        match started {
            Ok(ticker) => {
                ns_debug!("Loading ticker started ({:?})", self.loading_interval);
                self.ticker = Some(ticker);
            }
            Err(err) => ns_error!("Failed to start loading ticker: {}", err),
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
            ns_debug!("Loading ticker stopped");
        }
    }
}

fn spawn_event_loop(
    events: EngineEvents,
    msg_tx: mpsc::Sender<Msg>,
    notify: Notify,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name("netscope-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                let msg = event_to_msg(event, || Local::now().format("%H:%M:%S").to_string());
                if msg_tx.send(msg).is_err() {
                    break;
                }
                notify();
            }
            ns_debug!("Engine event loop finished");
        })?;
    Ok(())
}

fn event_to_msg(event: EngineEvent, fetched_at: impl FnOnce() -> String) -> Msg {
    match event {
        EngineEvent::ScrapeCompleted {
            request_id,
            url,
            result: Ok(document),
        } => {
            ns_info!(
                "Scrape done request_id={} url={} keys={}",
                request_id,
                url,
                document.facets.len()
            );
            Msg::FetchSucceeded {
                request_id,
                result: map_document(document),
                fetched_at: fetched_at(),
            }
        }
        EngineEvent::ScrapeCompleted {
            request_id,
            url,
            result: Err(err),
        } => {
            ns_warn!("Scrape {} failed for {}: {}", request_id, url, err);
            Msg::FetchFailed { request_id }
        }
    }
}

fn map_document(document: ScrapeDocument) -> ScrapeResult {
    document
        .facets
        .into_iter()
        .filter_map(|(key, value)| match Facet::from_key(&key) {
            Some(facet) => Some((facet, map_value(value))),
            None => {
                ns_debug!("Ignoring unknown key {:?}", key);
                None
            }
        })
        .collect()
}

fn map_value(value: FacetValue) -> FacetData {
    match value {
        FacetValue::Text(text) => FacetData::Text(text),
        FacetValue::Items(items) => FacetData::Items(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscope_engine::{parse_document, FailureKind, FetchError};

    const TICK: Duration = Duration::from_millis(20);

    fn runner() -> (EffectRunner, mpsc::Receiver<Msg>) {
        let (msg_tx, msg_rx) = mpsc::channel();
        let settings = ScrapeSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ScrapeSettings::default()
        };
        let runner = EffectRunner::new(settings, TICK, msg_tx, Arc::new(|| {})).unwrap();
        (runner, msg_rx)
    }

    fn assert_quiet(msg_rx: &mpsc::Receiver<Msg>) {
        while msg_rx.try_recv().is_ok() {}
        thread::sleep(TICK * 5);
        assert!(msg_rx.try_recv().is_err(), "ticks kept arriving");
    }

    #[test]
    fn start_ticker_delivers_loading_ticks() {
        let (mut runner, msg_rx) = runner();

        runner.run(vec![Effect::StartLoadingTicker]);

        assert_eq!(
            msg_rx.recv_timeout(Duration::from_secs(2)),
            Ok(Msg::LoadingTick)
        );
    }

    #[test]
    fn second_start_keeps_the_running_ticker() {
        let (mut runner, msg_rx) = runner();
        runner.run(vec![Effect::StartLoadingTicker]);
        assert_eq!(
            msg_rx.recv_timeout(Duration::from_secs(2)),
            Ok(Msg::LoadingTick)
        );

        runner.run(vec![Effect::StartLoadingTicker]);
        assert!(runner.ticker.is_some());

        // One stop silences every tick source.
        runner.run(vec![Effect::StopLoadingTicker]);
        assert!(runner.ticker.is_none());
        assert_quiet(&msg_rx);
    }

    #[test]
    fn stop_ticker_ends_loading_ticks() {
        let (mut runner, msg_rx) = runner();
        runner.run(vec![Effect::StartLoadingTicker]);
        assert_eq!(
            msg_rx.recv_timeout(Duration::from_secs(2)),
            Ok(Msg::LoadingTick)
        );

        runner.run(vec![Effect::StopLoadingTicker]);

        assert!(runner.ticker.is_none());
        assert_quiet(&msg_rx);
    }

    #[test]
    fn dropping_runner_ends_loading_ticks() {
        let (mut runner, msg_rx) = runner();
        runner.run(vec![Effect::StartLoadingTicker]);
        assert_eq!(
            msg_rx.recv_timeout(Duration::from_secs(2)),
            Ok(Msg::LoadingTick)
        );

        drop(runner);

        assert_quiet(&msg_rx);
    }

    #[test]
    fn stop_without_start_is_harmless() {
        let (mut runner, msg_rx) = runner();

        runner.run(vec![Effect::StopLoadingTicker]);

        assert!(runner.ticker.is_none());
        assert_quiet(&msg_rx);
    }

    #[test]
    fn known_keys_map_to_facets_and_unknown_keys_are_dropped() {
        let document =
            parse_document(r#"{"html":"<p>hi</p>","images":["a.png"],"status":"ok"}"#).unwrap();

        let result = map_document(document);

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.get(Facet::Html),
            Some(&FacetData::Text("<p>hi</p>".to_string()))
        );
        assert_eq!(
            result.get(Facet::Images),
            Some(&FacetData::Items(vec!["a.png".to_string()]))
        );
        assert_eq!(result.get(Facet::Css), None);
    }

    #[test]
    fn successful_event_becomes_fetch_succeeded() {
        let event = EngineEvent::ScrapeCompleted {
            request_id: 3,
            url: "example.com".to_string(),
            result: parse_document(r#"{"js":["app.js"]}"#),
        };

        let msg = event_to_msg(event, || "09:30:00".to_string());

        assert_eq!(
            msg,
            Msg::FetchSucceeded {
                request_id: 3,
                result: ScrapeResult::new()
                    .with(Facet::Js, FacetData::Items(vec!["app.js".to_string()])),
                fetched_at: "09:30:00".to_string(),
            }
        );
    }

    #[test]
    fn failed_event_becomes_fetch_failed() {
        let event = EngineEvent::ScrapeCompleted {
            request_id: 4,
            url: "example.com".to_string(),
            result: parse_document("not json"),
        };

        let msg = event_to_msg(event, || unreachable!("no timestamp on failure"));

        assert_eq!(msg, Msg::FetchFailed { request_id: 4 });
    }

    #[test]
    fn every_failure_kind_collapses_to_one_message() {
        for kind in [FailureKind::Network, FailureKind::Timeout, FailureKind::HttpStatus(404)] {
            let event = EngineEvent::ScrapeCompleted {
                request_id: 9,
                url: "example.com".to_string(),
                result: Err(failure(kind)),
            };
            assert_eq!(
                event_to_msg(event, String::new),
                Msg::FetchFailed { request_id: 9 }
            );
        }
    }

    fn failure(kind: FailureKind) -> FetchError {
        FetchError {
            kind,
            message: "boom".to_string(),
        }
    }
}
