//! Method table listing

use farmrpc::Method;
use std::fmt::Write;

/// Parameter object shape for a method, as accepted by `encode --params`
pub fn params_shape(method: Method) -> &'static str {
    match method {
        Method::HomeAll | Method::HomeX | Method::HomeY | Method::HomeZ => "{speed}",
        Method::MoveAbsolute | Method::MoveRelative => "{speed, x, y, z}",
        Method::WritePin => "{pin_mode, pin_value, pin_number}",
        Method::TogglePin => "{pin_number}",
        Method::StartRegimen | Method::StopRegimen => "{regimen_id}",
        Method::Calibrate => "{target: x|y|z}",
        Method::ExecSequence => "{steps: [...]}",
        Method::McuConfigUpdate | Method::BotConfigUpdate | Method::StatusUpdate => "{...}",
        _ => "-",
    }
}

fn kind(method: Method) -> &'static str {
    if method.is_notification_only() {
        "notification"
    } else if method.returns_payload() {
        "request -> payload"
    } else {
        "request -> OK"
    }
}

/// Render the method table
pub fn render() -> String {
    let width = Method::ALL
        .iter()
        .map(|m| m.as_str().len())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for method in Method::ALL {
        let _ = writeln!(
            out,
            "{:<width$}  {:<34}  {}",
            method.as_str(),
            params_shape(method),
            kind(method),
        );
    }
    out
}
