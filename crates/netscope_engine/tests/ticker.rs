use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use netscope_engine::Ticker;

#[test]
fn ticker_fires_repeatedly() {
    let (tx, rx) = mpsc::channel();
    let ticker = Ticker::start(Duration::from_millis(10), move || {
        let _ = tx.send(());
    })
    .expect("ticker");

    for _ in 0..3 {
        rx.recv_timeout(Duration::from_secs(2)).expect("tick");
    }
    ticker.stop();
}

#[test]
fn no_ticks_after_stop() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let ticker = Ticker::start(Duration::from_millis(10), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .expect("ticker");

    thread::sleep(Duration::from_millis(80));
    ticker.stop();
    let after_stop = count.load(Ordering::SeqCst);
    assert!(after_stop > 0);

    thread::sleep(Duration::from_millis(80));
    assert_eq!(count.load(Ordering::SeqCst), after_stop);
}

#[test]
fn dropping_the_ticker_stops_it() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    {
        let _ticker = Ticker::start(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .expect("ticker");
        thread::sleep(Duration::from_millis(50));
    }
    let after_drop = count.load(Ordering::SeqCst);

    thread::sleep(Duration::from_millis(60));
    assert_eq!(count.load(Ordering::SeqCst), after_drop);
}

#[test]
fn stopping_before_first_interval_never_ticks() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let ticker = Ticker::start(Duration::from_secs(60), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .expect("ticker");

    ticker.stop();
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
