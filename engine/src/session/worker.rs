//! Session worker thread
//!
//! Runs a [`Session`] on a dedicated thread behind mpsc channels, so a
//! UI or render loop can send commands and poll events without ever
//! blocking on the simulation. The thread ticks at the engine's fixed
//! timestep once a scene is initialized; the engine's deep-copy
//! snapshot contract is what makes handing states across the channel
//! safe without locks.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{Command, Event, Session};

/// Idle polling interval before a scene is initialized.
const IDLE_POLL: Duration = Duration::from_millis(10);

enum WorkerMessage {
    Command(Command),
    Shutdown,
}

/// Handle to a session running on its own thread.
pub struct SessionWorker {
    tx_cmd: Sender<WorkerMessage>,
    rx_evt: Receiver<Event>,
    thread: Option<JoinHandle<()>>,
}

impl SessionWorker {
    /// Spawn the worker thread with a fresh session.
    pub fn spawn() -> Self {
        let (tx_cmd, rx_cmd) = mpsc::channel::<WorkerMessage>();
        let (tx_evt, rx_evt) = mpsc::channel::<Event>();

        let thread = thread::Builder::new()
            .name("springbox-session".to_string())
            .spawn(move || worker_loop(rx_cmd, tx_evt))
            .expect("failed to spawn session worker");

        Self {
            tx_cmd,
            rx_evt,
            thread: Some(thread),
        }
    }

    /// Send a command to the session. Returns false if the worker is
    /// gone.
    pub fn send(&self, command: Command) -> bool {
        self.tx_cmd.send(WorkerMessage::Command(command)).is_ok()
    }

    /// Poll one pending event, if any.
    pub fn try_recv(&self) -> Option<Event> {
        self.rx_evt.try_recv().ok()
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(WorkerMessage::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop(rx_cmd: Receiver<WorkerMessage>, tx_evt: Sender<Event>) {
    let mut session = Session::new();
    let started = Instant::now();
    let mut events = Vec::new();

    loop {
        // Drain every pending command before the next tick.
        loop {
            match rx_cmd.try_recv() {
                Ok(WorkerMessage::Command(command)) => {
                    if let Err(err) = session.handle(command, started.elapsed(), &mut events) {
                        eprintln!("scene rejected: {err}");
                    }
                }
                Ok(WorkerMessage::Shutdown) | Err(TryRecvError::Disconnected) => return,
                Err(TryRecvError::Empty) => break,
            }
        }

        session.tick(started.elapsed(), &mut events);

        for event in events.drain(..) {
            if tx_evt.send(event).is_err() {
                return;
            }
        }

        let cadence = session
            .engine()
            .map(|engine| Duration::from_secs_f64(engine.dt()))
            .unwrap_or(IDLE_POLL);
        thread::sleep(cadence);
    }
}
