//! 文字 CLI：读取 stdin → 解析命令 → 按当前场景派发事件

use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::bags::components::BagSize;
use crate::bags::events::{AdjustBag, ConfirmBags};
use crate::checkout::events::{
    ChoosePayment, InsertBill, OpenWallet, PaymentMethod, ProceedToCheckout, ScanBarcode, TapCard,
};
use crate::core::{
    events::{DescribeScene, LogEvent},
    states::AppState,
};
use crate::kitchen::events::{PlayAgain, ServePie, TakeBite};
use crate::lobby::events::{ChooseField, ConfirmCharacter, SelectCharacter, StartGame};
use crate::picking::events::{FinishPicking, HarvestAction, HarvestBush};
use crate::session::{Character, Session};
use crate::weighing::events::{LiftBag, PlaceBag, RequestBarcode};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match buffer.lock() {
                        Ok(mut buf) => buf.push_back(line.to_string()),
                        Err(_) => break,
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // Loading 期间的输入留到进入菜单后再处理
            .add_systems(
                Update,
                execute_cli_commands
                    .after(read_stdin)
                    .run_if(not(in_state(AppState::Startup)).and(not(in_state(AppState::Loading)))),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Help,
    Status,
    Look,
    Exit,
    Start(String),
    Character(Character),
    Continue,
    Field(String),
    Bag { size: BagSize, delta: i32 },
    Go,
    Harvest { column: u32, position: u32, action: HarvestAction },
    Weigh,
    Place(usize),
    Lift(usize),
    Barcode,
    Scan,
    Checkout,
    Pay(PaymentMethod),
    Wallet,
    Bill(usize),
    Tap,
    ServePie,
    Bite,
    Again,
    Invalid(String), // 命令认识，但参数不对
    Unsupported(String),
}

impl Command {
    /// 只能在某个场景下用的命令；None = 随处可用
    fn scene(&self) -> Option<AppState> {
        match self {
            Command::Help | Command::Status | Command::Look | Command::Exit => None,
            Command::Invalid(_) | Command::Unsupported(_) => None,
            Command::Start(_) => Some(AppState::Menu),
            Command::Character(_) | Command::Continue => Some(AppState::CharacterSelect),
            Command::Field(_) => Some(AppState::FieldSelect),
            Command::Bag { .. } | Command::Go => Some(AppState::BagSelect),
            Command::Harvest { .. } | Command::Weigh => Some(AppState::Pick),
            Command::Place(_) | Command::Lift(_) | Command::Barcode => Some(AppState::Weigh),
            Command::Scan | Command::Checkout => Some(AppState::Barcode),
            Command::Pay(_) | Command::Wallet | Command::Bill(_) | Command::Tap => Some(AppState::Checkout),
            Command::ServePie => Some(AppState::Cook),
            Command::Bite | Command::Again => Some(AppState::Eat),
        }
    }
}

/// 菜单到选袋
#[derive(SystemParam)]
struct LobbyWriters<'w> {
    start: EventWriter<'w, StartGame>,
    character: EventWriter<'w, SelectCharacter>,
    confirm_character: EventWriter<'w, ConfirmCharacter>,
    field: EventWriter<'w, ChooseField>,
    bag: EventWriter<'w, AdjustBag>,
    confirm_bags: EventWriter<'w, ConfirmBags>,
    harvest: EventWriter<'w, HarvestBush>,
    finish_picking: EventWriter<'w, FinishPicking>,
    describe: EventWriter<'w, DescribeScene>,
}

/// 称重到吃派
#[derive(SystemParam)]
struct CounterWriters<'w> {
    place: EventWriter<'w, PlaceBag>,
    lift: EventWriter<'w, LiftBag>,
    barcode: EventWriter<'w, RequestBarcode>,
    scan: EventWriter<'w, ScanBarcode>,
    checkout: EventWriter<'w, ProceedToCheckout>,
    pay: EventWriter<'w, ChoosePayment>,
    wallet: EventWriter<'w, OpenWallet>,
    bill: EventWriter<'w, InsertBill>,
    tap: EventWriter<'w, TapCard>,
    serve: EventWriter<'w, ServePie>,
    bite: EventWriter<'w, TakeBite>,
    again: EventWriter<'w, PlayAgain>,
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    session: Res<Session>,
    mut lobby: LobbyWriters,
    mut counter: CounterWriters,
) {
    for CliLine(input) in line_reader.read() {
        let command = parse_command(input);
        let current = *state.get();
        if let Some(scene) = command.scene() {
            if scene != current {
                log.write(LogEvent(format!(
                    "当前场景 [{}] 不支持该命令，输入 help 查看可用命令",
                    current.title()
                )));
                continue;
            }
        }

        match command {
            Command::Help => {
                log.write(LogEvent(help_text(current)));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "Scene: {} | Player: {} ({}) | Field: {} | Bags: {} | Berries: {} | Weight: {:.2} lb | Price: ${:.2}",
                    current.title(),
                    session.player_name,
                    session.character.key(),
                    session.field.as_deref().unwrap_or("-"),
                    session.bags.len(),
                    session.total_filled(),
                    session.weight,
                    session.price
                )));
            }

            Command::Look => {
                lobby.describe.write(DescribeScene);
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Start(name) => {
                lobby.start.write(StartGame { name });
            }
            Command::Character(character) => {
                lobby.character.write(SelectCharacter(character));
            }
            Command::Continue => {
                lobby.confirm_character.write(ConfirmCharacter);
            }
            Command::Field(name) => {
                lobby.field.write(ChooseField { name });
            }
            Command::Bag { size, delta } => {
                lobby.bag.write(AdjustBag { size, delta });
            }
            Command::Go => {
                lobby.confirm_bags.write(ConfirmBags);
            }
            Command::Harvest { column, position, action } => {
                lobby.harvest.write(HarvestBush { column, position, action });
            }
            Command::Weigh => {
                lobby.finish_picking.write(FinishPicking);
            }

            Command::Place(index) => {
                counter.place.write(PlaceBag { index });
            }
            Command::Lift(index) => {
                counter.lift.write(LiftBag { index });
            }
            Command::Barcode => {
                counter.barcode.write(RequestBarcode);
            }
            Command::Scan => {
                counter.scan.write(ScanBarcode);
            }
            Command::Checkout => {
                counter.checkout.write(ProceedToCheckout);
            }
            Command::Pay(method) => {
                counter.pay.write(ChoosePayment(method));
            }
            Command::Wallet => {
                counter.wallet.write(OpenWallet);
            }
            Command::Bill(index) => {
                counter.bill.write(InsertBill { index });
            }
            Command::Tap => {
                counter.tap.write(TapCard);
            }
            Command::ServePie => {
                counter.serve.write(ServePie);
            }
            Command::Bite => {
                counter.bite.write(TakeBite);
            }
            Command::Again => {
                counter.again.write(PlayAgain);
            }

            Command::Invalid(msg) => {
                log.write(LogEvent(format!("参数错误: {msg}")));
            }
            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = parts.collect();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "look" | "l" => Command::Look,
        "exit" | "quit" | "q" => Command::Exit,
        "start" => Command::Start(args.join(" ")),
        "character" | "char" => match args.first().map(|t| Character::parse(t)) {
            Some(Ok(character)) => Command::Character(character),
            Some(Err(err)) => Command::Invalid(err.to_string()),
            None => Command::Invalid("usage: character <1|2>".into()),
        },
        "continue" | "next" => Command::Continue,
        "field" => {
            if args.is_empty() {
                Command::Invalid("usage: field <name>".into())
            } else {
                Command::Field(args.join(" "))
            }
        }
        "bag" => parse_bag(&args),
        "go" => Command::Go,
        "eat" if args.is_empty() => Command::ServePie,
        "eat" => parse_harvest(&args, HarvestAction::Eat),
        "pick" => parse_harvest(&args, HarvestAction::Pick),
        "weigh" => Command::Weigh,
        "place" => parse_index(&args, Command::Place),
        "lift" => parse_index(&args, Command::Lift),
        "barcode" => Command::Barcode,
        "scan" => Command::Scan,
        "checkout" => Command::Checkout,
        "pay" => match args.first().map(|t| t.to_lowercase()).as_deref() {
            Some("cash") => Command::Pay(PaymentMethod::Cash),
            Some("card") => Command::Pay(PaymentMethod::Card),
            _ => Command::Invalid("usage: pay <cash|card>".into()),
        },
        "wallet" => Command::Wallet,
        "bill" => parse_index(&args, Command::Bill),
        "tap" => Command::Tap,
        "bite" => Command::Bite,
        "again" => Command::Again,
        other => Command::Unsupported(other.into()),
    }
}

fn parse_bag(args: &[&str]) -> Command {
    let (Some(size), Some(op)) = (args.first(), args.get(1)) else {
        return Command::Invalid("usage: bag <small|medium|large> <+|->".into());
    };
    let size = match BagSize::parse(size) {
        Ok(size) => size,
        Err(err) => return Command::Invalid(err.to_string()),
    };
    match *op {
        "+" => Command::Bag { size, delta: 1 },
        "-" => Command::Bag { size, delta: -1 },
        other => Command::Invalid(format!("expected + or -, got `{other}`")),
    }
}

fn parse_harvest(args: &[&str], action: HarvestAction) -> Command {
    match (
        args.first().and_then(|t| t.parse().ok()),
        args.get(1).and_then(|t| t.parse().ok()),
    ) {
        (Some(column), Some(position)) => Command::Harvest { column, position, action },
        _ => Command::Invalid("usage: eat|pick <column> <position>".into()),
    }
}

fn parse_index(args: &[&str], make: fn(usize) -> Command) -> Command {
    match args.first().and_then(|t| t.parse().ok()) {
        Some(index) => make(index),
        None => Command::Invalid("expected a non-negative index".into()),
    }
}

fn help_text(state: AppState) -> String {
    let scene = match state {
        AppState::Menu => "  start [name]           开始游戏",
        AppState::CharacterSelect => "  character <1|2>        选择角色\n  continue               下一步",
        AppState::FieldSelect => "  field <name>           选择田地",
        AppState::BagSelect => "  bag <size> <+|->       增减袋子\n  go                     下田",
        AppState::Pick => {
            "  eat <col> <pos>        吃一颗\n  pick <col> <pos>       整丛装袋\n  weigh                  去称重"
        }
        AppState::Weigh => "  place <i>              放上秤\n  lift <i>               拿下秤\n  barcode                打条码",
        AppState::Barcode => "  scan                   扫码\n  checkout               去结账",
        AppState::Checkout => {
            "  pay <cash|card>        选择付款方式\n  wallet                 打开钱包\n  bill <i>               投入钞票\n  tap                    刷卡"
        }
        AppState::Cook => "  eat                    端上派",
        AppState::Eat => "  bite                   咬一口\n  again                  再玩一次",
        AppState::Startup | AppState::Loading => "",
    };
    format!(
        "命令列表:
  help                   查看帮助
  status                 查看当前状态
  look                   查看当前场景
  exit / quit            退出程序
{scene}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_commands() {
        assert_eq!(parse_command("start  Jo  Ann "), Command::Start("Jo Ann".into()));
        assert_eq!(parse_command("START"), Command::Start(String::new()));
        assert_eq!(parse_command("character 2"), Command::Character(Character::Human2));
        assert_eq!(parse_command("field blueberry"), Command::Field("blueberry".into()));
        assert_eq!(
            parse_command("bag m +"),
            Command::Bag { size: BagSize::Medium, delta: 1 }
        );
        assert_eq!(
            parse_command("pick 3 7"),
            Command::Harvest { column: 3, position: 7, action: HarvestAction::Pick }
        );
        assert_eq!(parse_command("place 1"), Command::Place(1));
        assert_eq!(parse_command("pay CARD"), Command::Pay(PaymentMethod::Card));
        assert_eq!(parse_command("bill 4"), Command::Bill(4));
    }

    #[test]
    fn eat_without_arguments_serves_the_pie() {
        assert_eq!(parse_command("eat"), Command::ServePie);
        assert_eq!(
            parse_command("eat 0 0"),
            Command::Harvest { column: 0, position: 0, action: HarvestAction::Eat }
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(parse_command("pick -1 2"), Command::Invalid(_)));
        assert!(matches!(parse_command("bag huge +"), Command::Invalid(_)));
        assert!(matches!(parse_command("bag small 3"), Command::Invalid(_)));
        assert!(matches!(parse_command("place x"), Command::Invalid(_)));
        assert!(matches!(parse_command("character 3"), Command::Invalid(_)));
        assert_eq!(parse_command("dance"), Command::Unsupported("dance".into()));
    }

    #[test]
    fn commands_are_bound_to_their_scene() {
        assert_eq!(parse_command("status").scene(), None);
        assert_eq!(parse_command("go").scene(), Some(AppState::BagSelect));
        assert_eq!(parse_command("eat").scene(), Some(AppState::Cook));
        assert_eq!(parse_command("eat 1 1").scene(), Some(AppState::Pick));
        assert_eq!(parse_command("tap").scene(), Some(AppState::Checkout));
    }
}
