//! Per-line trace events of the recovery parser.

use std::io;
use std::sync::{Arc, Mutex};

use mhd_ingest::parse_recovered;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_rejected_lines_are_traced_with_reason() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(captured.clone())
        .finish();

    let text = "Entity,Code,Year,Depression\nBrazil,BRA,2015,4.2\nshort,line\n,,,\n";
    let records = tracing::subscriber::with_default(subscriber, || parse_recovered(text)).unwrap();
    assert_eq!(records.len(), 1);

    let output = captured.text();
    assert!(output.contains("line kept"), "{output}");
    assert!(output.contains("line=3"), "{output}");
    assert!(output.contains("too few fields"), "{output}");
    assert!(output.contains("line=4"), "{output}");
    assert!(output.contains("neither year nor code"), "{output}");
}
