//! `Error::report()` emits one structured event per chain.
#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex};

use errlink::{Error, wrap};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn report_emits_structured_fields() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let err = wrap(Error::new("connection reset").add_types(["net"]), "syncing inbox")
        .add_tag("account", 12);
    tracing::subscriber::with_default(subscriber, || err.report());

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("ERROR"), "Got:\n{}", output);
    assert!(output.contains("error=syncing inbox: connection reset"), "Got:\n{}", output);
    assert!(output.contains("root_cause=connection reset"), "Got:\n{}", output);
    assert!(output.contains("types=[\"net\"]"), "Got:\n{}", output);
    assert!(output.contains("account"), "Got:\n{}", output);
}
