#![allow(dead_code)]

use binsmart::client::Classifier;
use binsmart::domain::{ClassificationRequest, Outcome};
use binsmart::input::{CaptureDevice, InputAcquisition, MemoryPreviewStore, RawCapture};
use binsmart::runtime::{Runtime, RuntimeMessage};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Smallest valid PNG: 1x1 transparent pixel.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

pub const WAIT: Duration = Duration::from_secs(10);

/// Writes the tiny PNG into `dir` and returns its path.
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, TINY_PNG).expect("write png");
    path
}

/// Capture device that hands out queued captures, then reports cancel.
#[derive(Default, Clone)]
pub struct QueuedDevice {
    captures: Arc<Mutex<VecDeque<RawCapture>>>,
}

impl QueuedDevice {
    pub fn with_png(name: &str) -> Self {
        let device = Self::default();
        device.push(RawCapture {
            bytes: TINY_PNG.to_vec(),
            file_name: Some(name.to_string()),
        });
        device
    }

    pub fn push(&self, capture: RawCapture) {
        self.captures.lock().expect("lock").push_back(capture);
    }
}

impl CaptureDevice for QueuedDevice {
    fn capture(&self) -> binsmart::Result<Option<RawCapture>> {
        Ok(self.captures.lock().expect("lock").pop_front())
    }
}

/// Classifier that answers from a script and records every request.
#[derive(Default)]
pub struct ScriptedClassifier {
    outcomes: Mutex<VecDeque<Outcome>>,
    pub requests: Mutex<Vec<ClassificationRequest>>,
    /// Held while classifying, so tests can keep a submission in flight.
    pub gate: Mutex<()>,
}

impl ScriptedClassifier {
    pub fn new(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, request: &ClassificationRequest) -> Outcome {
        let _held = self.gate.lock().expect("gate");
        self.requests.lock().expect("lock").push(request.clone());
        self.outcomes
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| panic!("classifier called more times than scripted"))
    }
}

pub struct Harness {
    pub runtime: Runtime,
    pub inbox: Receiver<RuntimeMessage>,
    pub previews: Arc<MemoryPreviewStore>,
    pub classifier: Arc<ScriptedClassifier>,
    pub file_picker: QueuedDevice,
    pub camera: QueuedDevice,
}

impl Harness {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        let previews = Arc::new(MemoryPreviewStore::default());
        let classifier = ScriptedClassifier::new(outcomes);
        let file_picker = QueuedDevice::default();
        let camera = QueuedDevice::default();
        let input = InputAcquisition::new(
            Box::new(file_picker.clone()),
            Box::new(camera.clone()),
            previews.clone(),
            1024 * 1024,
        );

        let (outbox, inbox) = mpsc::channel();
        let runtime = Runtime::new(input, classifier.clone(), outbox).expect("runtime");

        Self {
            runtime,
            inbox,
            previews,
            classifier,
            file_picker,
            camera,
        }
    }

    pub fn wait(&mut self) {
        self.runtime
            .wait_for_outcome(&self.inbox, WAIT)
            .expect("outcome");
    }
}

/// What the loopback server saw.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One-shot HTTP server on 127.0.0.1 that replies with a canned response.
pub struct LoopbackServer {
    pub addr: SocketAddr,
    handle: Option<JoinHandle<CapturedRequest>>,
}

impl LoopbackServer {
    pub fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let body = body.to_string();

        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let captured = read_request(&mut reader);

            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush");
            captured
        });

        Self {
            addr,
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/predict", self.addr)
    }

    /// Waits for the single request and returns it.
    pub fn captured(mut self) -> CapturedRequest {
        self.handle
            .take()
            .expect("handle")
            .join()
            .expect("server thread")
    }
}

fn read_request<R: BufRead>(reader: &mut R) -> CapturedRequest {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let find = |name: &str| {
        headers
            .iter()
            .find(|(key, _): &&(String, String)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    };

    let body = if let Some(length) = find("content-length") {
        let mut body = vec![0; length.parse().expect("content length")];
        reader.read_exact(&mut body).expect("body");
        body
    } else if find("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        read_chunked(reader)
    } else {
        Vec::new()
    };

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body,
    }
}

fn read_chunked<R: BufRead>(reader: &mut R) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).expect("chunk size");
        let size = usize::from_str_radix(size_line.trim(), 16).expect("hex chunk size");
        let mut chunk = vec![0; size + 2];
        reader.read_exact(&mut chunk).expect("chunk");
        if size == 0 {
            return body;
        }
        body.extend_from_slice(&chunk[..size]);
    }
}
