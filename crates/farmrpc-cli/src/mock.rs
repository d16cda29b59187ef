//! Mock bot command implementation
//!
//! Serves newline-delimited JSON-RPC over stdin/stdout against a simulated
//! bot. Requests are handled concurrently; replies are written in completion
//! order, one per line.

use anyhow::Result;
use farmrpc::{
    Command, Dispatcher, DispatcherConfig, Handler, HandlerError, HandlerResult, Method, Reply,
    async_trait,
};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

/// Error code reported for motion and I/O while emergency-locked
pub const LOCKED: i64 = 1;

#[derive(Debug, Default)]
struct BotSim {
    location: [f64; 3],
    pins: BTreeMap<u32, i32>,
    locked: bool,
    mcu_params: Map<String, Value>,
    configuration: Map<String, Value>,
    regimens: BTreeSet<u64>,
}

impl BotSim {
    fn status(&self) -> Value {
        let [x, y, z] = self.location;
        let pins: Map<String, Value> = self
            .pins
            .iter()
            .map(|(pin, value)| (pin.to_string(), json!(value)))
            .collect();
        json!({
            "location": {"x": x, "y": y, "z": z},
            "pins": pins,
            "locked": self.locked,
            "mcu_params": self.mcu_params,
            "configuration": self.configuration,
            "regimens": self.regimens,
        })
    }
}

/// Simulated bot answering every method
#[derive(Default)]
pub struct MockBot {
    state: Mutex<BotSim>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the simulated state, as returned by `read_status`
    pub fn status(&self) -> Value {
        self.state.lock().status()
    }

    fn apply(&self, command: Command) -> HandlerResult {
        let mut bot = self.state.lock();

        let allowed_while_locked = matches!(
            command,
            Command::EmergencyLock
                | Command::EmergencyUnlock
                | Command::ReadStatus
                | Command::Sync
                | Command::StatusUpdate(_)
        );
        if bot.locked && !allowed_while_locked {
            return Err(HandlerError::new(
                LOCKED,
                format!("bot is locked, refusing {}", command.method()),
            ));
        }

        match command {
            Command::EmergencyLock => bot.locked = true,
            Command::EmergencyUnlock => bot.locked = false,
            Command::ReadStatus | Command::Sync => return Ok(Reply::Payload(bot.status())),
            Command::HomeAll(_) => bot.location = [0.0; 3],
            Command::HomeX(_) => bot.location[0] = 0.0,
            Command::HomeY(_) => bot.location[1] = 0.0,
            Command::HomeZ(_) => bot.location[2] = 0.0,
            Command::MoveAbsolute(params) => bot.location = [params.x, params.y, params.z],
            Command::MoveRelative(params) => {
                let [x, y, z] = bot.location;
                bot.location = [x + params.x, y + params.y, z + params.z];
            }
            Command::WritePin(params) => {
                bot.pins.insert(params.pin_number, params.pin_value);
            }
            Command::TogglePin(params) => {
                let value = bot.pins.entry(params.pin_number).or_default();
                *value = if *value == 0 { 1 } else { 0 };
            }
            Command::StartRegimen(params) => {
                bot.regimens.insert(params.regimen_id);
            }
            Command::StopRegimen(params) => {
                bot.regimens.remove(&params.regimen_id);
            }
            Command::McuConfigUpdate(update) => bot.mcu_params.extend(update.into_map()),
            Command::BotConfigUpdate(update) => bot.configuration.extend(update.into_map()),
            Command::StatusUpdate(state) => {
                tracing::info!(fields = state.len(), "Status update received");
            }
            Command::ExecSequence(sequence) => {
                tracing::info!(steps = sequence.steps.len(), "Executing sequence");
            }
            Command::Calibrate(params) => {
                tracing::info!(axis = params.target.as_str(), "Calibrating");
            }
            Command::CheckUpdates
            | Command::CheckArduinoUpdates
            | Command::PowerOff
            | Command::Reboot => {}
        }
        Ok(Reply::Ack)
    }
}

#[async_trait]
impl Handler for MockBot {
    async fn handle(&self, command: Command) -> HandlerResult {
        self.apply(command)
    }
}

/// Dispatcher serving every method from `bot`
pub fn dispatcher(bot: Arc<MockBot>, config: &DispatcherConfig) -> Result<Dispatcher> {
    let bot: Arc<dyn Handler> = bot;
    let builder = Method::ALL
        .iter()
        .fold(Dispatcher::builder(), |builder, method| {
            builder.register_shared(*method, bot.clone())
        });
    Ok(builder.build(config)?)
}

/// Serve stdin until end of input
pub async fn run(config: &DispatcherConfig) -> Result<()> {
    let dispatcher = Arc::new(dispatcher(Arc::new(MockBot::new()), config)?);
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(reply) = rx.recv().await {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    tracing::info!(methods = dispatcher.methods().len(), "Mock bot ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let dispatcher = dispatcher.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(reply) = dispatcher.handle_text(&line).await {
                let _ = tx.send(reply);
            }
        });
    }
    drop(tx);

    writer.await??;
    tracing::info!("Mock bot stopped");
    Ok(())
}
