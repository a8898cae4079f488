pub mod components;
pub mod events;
mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use components::Till;
use events::*;
use systems::*;

/// 打条码 + 付款
pub struct CheckoutPlugin;
impl Plugin for CheckoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Till>()
            .add_event::<ScanBarcode>()
            .add_event::<ProceedToCheckout>()
            .add_event::<ChoosePayment>()
            .add_event::<OpenWallet>()
            .add_event::<InsertBill>()
            .add_event::<TapCard>()
            .add_systems(OnEnter(AppState::Barcode), open_till)
            .add_systems(
                Update,
                (scan_barcode, proceed_to_checkout, describe_barcode)
                    .chain()
                    .run_if(in_state(AppState::Barcode)),
            )
            .add_systems(OnEnter(AppState::Checkout), announce_total)
            .add_systems(
                Update,
                (choose_payment, open_wallet, insert_bill, tap_card, finish_payment, describe_checkout)
                    .chain()
                    .run_if(in_state(AppState::Checkout)),
            );
    }
}
