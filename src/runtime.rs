// ===============================
// src/runtime.rs
// ===============================
//
// Live mode: real timers on the current-thread runtime, commands from stdin.
// Timer tasks only send a TimerTask back to the loop, so every state change
// still happens on the one loop task, one event at a time.
//
use ahash::AHashMap as HashMap;
use chrono::{DateTime, Utc};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    select,
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, sleep, Duration, Instant, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::app::Exchange;
use crate::command::Command;
use crate::config::Args;
use crate::domain::TimerTask;
use crate::random::SeededRandom;
use crate::scheduler::{Clock, Scheduler, TimerId};
use crate::surface::{HistoryStack, Recorded, TracingRenderer};

pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerTask>,
    handles: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::UnboundedSender<TimerTask>) -> Self {
        Self { tx, handles: HashMap::new(), next_id: 0 }
    }

    fn track(&mut self, handle: JoinHandle<()>) -> TimerId {
        self.handles.retain(|_, h| !h.is_finished());
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.handles.insert(id, handle);
        id
    }
}

impl Clock for TokioScheduler {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_periodic(&mut self, period: Duration, task: TimerTask) -> TimerId {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut tick = interval_at(Instant::now() + period, period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                if tx.send(task.clone()).is_err() {
                    break;
                }
            }
        });
        self.track(handle)
    }

    fn schedule_once(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(task);
        });
        self.track(handle)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(h) = self.handles.remove(&id) {
            h.abort();
        }
    }
}

pub async fn run(args: Args, rec_tx: Option<mpsc::Sender<Recorded>>) {
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<TimerTask>();
    let mut ex = Exchange::new(
        args.timings(),
        TokioScheduler::new(timer_tx),
        TracingRenderer::new(rec_tx),
        HistoryStack::new(args.start_page.clone()),
        Box::new(SeededRandom::new(args.seed)),
        &args.default_pair,
    );
    ex.start();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        select! {
            Some(task) = timer_rx.recv() => ex.on_timer(task),
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                        break;
                    }
                    match line.parse::<Command>() {
                        Ok(cmd) => ex.dispatch(cmd),
                        Err(e) => warn!(%e, "command ignored"),
                    }
                }
                Ok(None) => {
                    info!("stdin closed, timers keep running (ctrl-c to stop)");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!(?e, "stdin read failed");
                    stdin_open = false;
                }
            },
            _ = &mut ctrl_c => {
                info!("ctrl-c received");
                break;
            }
        }
    }
    ex.shutdown();
    info!(page = %ex.page(), pair = %ex.active_pair(), "session ended");
}
