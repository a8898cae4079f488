use super::{components::*, events::*};
use crate::core::events::{DescribeScene, LogEvent};
use crate::core::{resources::GameConfig, states::AppState};
use crate::session::Session;
use bevy::prelude::*;

pub fn open_till(mut commands: Commands, session: Res<Session>, mut log: EventWriter<LogEvent>) {
    commands.insert_resource(Till::default());
    log.write(LogEvent(format!(
        "Barcode for {} · 输入 scan 扫码",
        session.player_name
    )));
}

/// 扫码时算价，只算一次
pub fn scan_barcode(
    mut ev_scan: EventReader<ScanBarcode>,
    mut till: ResMut<Till>,
    mut session: ResMut<Session>,
    mut log: EventWriter<LogEvent>,
    config: Res<GameConfig>,
) {
    if ev_scan.is_empty() {
        return;
    }
    ev_scan.clear();

    if till.receipt.is_some() {
        log.write(LogEvent("已经扫过了".into()));
        return;
    }

    match Receipt::new(session.id, &session.player_name, session.weight, config.price_per_lb) {
        Ok(receipt) => {
            session.price = receipt.price;
            info!("receipt {}", receipt.to_json());
            log.write(LogEvent("Barcode Scanned Successfully!".into()));
            log.write(LogEvent(format!(
                "Total: ${:.2} ({:.2} lb @ ${}/lb)",
                receipt.price, receipt.weight_lb, receipt.rate_per_lb
            )));
            log.write(LogEvent(receipt.to_json()));
            till.receipt = Some(receipt);
        }
        Err(err) => {
            log.write(LogEvent(format!("扫码失败: {err}")));
        }
    }
}

pub fn proceed_to_checkout(
    mut ev_proceed: EventReader<ProceedToCheckout>,
    till: Res<Till>,
    mut next: ResMut<NextState<AppState>>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_proceed.is_empty() {
        return;
    }
    ev_proceed.clear();

    if till.receipt.is_none() {
        log.write(LogEvent("先扫码再结账".into()));
        return;
    }
    next.set(AppState::Checkout);
}

pub fn describe_barcode(mut ev_describe: EventReader<DescribeScene>, mut log: EventWriter<LogEvent>, till: Res<Till>) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    match &till.receipt {
        Some(receipt) => log.write(LogEvent(format!("Total: ${:.2}", receipt.price))),
        None => log.write(LogEvent("Drag the scanner to the barcode to scan".into())),
    };
}

pub fn announce_total(session: Res<Session>, mut log: EventWriter<LogEvent>) {
    log.write(LogEvent(format!(
        "Checkout · Total: ${:.2} · pay cash / pay card",
        session.price
    )));
}

/// 选付款方式；付完之前可以换
pub fn choose_payment(
    mut ev_choose: EventReader<ChoosePayment>,
    mut till: ResMut<Till>,
    session: Res<Session>,
    mut log: EventWriter<LogEvent>,
) {
    for ChoosePayment(method) in ev_choose.read() {
        if till.payment.as_ref().is_some_and(Payment::is_complete) {
            continue;
        }
        match method {
            PaymentMethod::Card => {
                till.payment = Some(Payment::Card { approved: false });
                log.write(LogEvent(format!("Card Payment · ${:.2} · Tap or Insert Card (tap)", session.price)));
            }
            PaymentMethod::Cash => {
                till.payment = Some(Payment::Cash(CashDrawer::new(session.price)));
                log.write(LogEvent(format!(
                    "Cash Payment · Amount Due: ${:.2} · 输入 wallet 打开钱包",
                    session.price
                )));
            }
        }
    }
}

pub fn open_wallet(mut ev_open: EventReader<OpenWallet>, mut till: ResMut<Till>, mut log: EventWriter<LogEvent>) {
    if ev_open.is_empty() {
        return;
    }
    ev_open.clear();

    let Some(Payment::Cash(drawer)) = till.payment.as_mut() else {
        log.write(LogEvent("先选择现金付款 (pay cash)".into()));
        return;
    };
    if !drawer.open_wallet() {
        log.write(LogEvent("钱包已经打开了".into()));
        return;
    }
    log.write(LogEvent(wallet_listing(drawer)));
}

pub fn insert_bill(mut ev_insert: EventReader<InsertBill>, mut till: ResMut<Till>, mut log: EventWriter<LogEvent>) {
    for ev in ev_insert.read() {
        let Some(Payment::Cash(drawer)) = till.payment.as_mut() else {
            log.write(LogEvent("先选择现金付款 (pay cash)".into()));
            continue;
        };
        if drawer.is_paid() {
            continue;
        }
        match drawer.insert(ev.index) {
            Ok(value) => {
                log.write(LogEvent(format!(
                    "投入 ${value} · Remaining: ${:.2}",
                    drawer.remaining()
                )));
            }
            Err(err) => {
                log.write(LogEvent(format!("{err}")));
            }
        }
    }
}

pub fn tap_card(mut ev_tap: EventReader<TapCard>, mut till: ResMut<Till>, mut log: EventWriter<LogEvent>) {
    if ev_tap.is_empty() {
        return;
    }
    ev_tap.clear();

    match till.payment.as_mut() {
        Some(Payment::Card { approved }) => *approved = true,
        _ => {
            log.write(LogEvent("先选择刷卡付款 (pay card)".into()));
        }
    }
}

/// 付清后进厨房
pub fn finish_payment(mut till: ResMut<Till>, mut next: ResMut<NextState<AppState>>, mut log: EventWriter<LogEvent>) {
    let Some(payment) = till.payment.as_ref() else {
        return;
    };
    if !payment.is_complete() {
        return;
    }
    match payment {
        Payment::Card { .. } => log.write(LogEvent("Payment Approved!".into())),
        Payment::Cash(drawer) => log.write(LogEvent(format!(
            "Payment Complete! Change: ${:.2}",
            drawer.change()
        ))),
    };
    till.payment = None;
    next.set(AppState::Cook);
}

pub fn describe_checkout(
    mut ev_describe: EventReader<DescribeScene>,
    mut log: EventWriter<LogEvent>,
    till: Res<Till>,
    session: Res<Session>,
) {
    if ev_describe.is_empty() {
        return;
    }
    ev_describe.clear();
    match &till.payment {
        None => {
            log.write(LogEvent(format!("Total: ${:.2} · Select Payment Method: cash / card", session.price)));
        }
        Some(Payment::Card { .. }) => {
            log.write(LogEvent(format!("终端显示 ${:.2} · Tap or Insert Card", session.price)));
        }
        Some(Payment::Cash(drawer)) => {
            log.write(LogEvent(format!(
                "Amount Due: ${:.2} · Remaining: ${:.2}",
                drawer.price,
                drawer.remaining()
            )));
            if drawer.bills.is_some() {
                log.write(LogEvent(wallet_listing(drawer)));
            }
        }
    }
}

fn wallet_listing(drawer: &CashDrawer) -> String {
    let bills = drawer.bills.as_deref().unwrap_or_default();
    let listing: Vec<String> = bills
        .iter()
        .enumerate()
        .filter(|(_, bill)| !bill.used)
        .map(|(index, bill)| format!("[{index}] ${}", bill.value))
        .collect();
    format!("钱包: {}", listing.join("  "))
}
