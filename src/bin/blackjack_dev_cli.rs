// src/bin/blackjack_dev_cli.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use blackjack_engine::api::{
    execute, query, Command, CommandResponse, CreateTableCommand, Query, QueryResponse,
    TableCommand, TableViewDto,
};
use blackjack_engine::domain::TableId;
use blackjack_engine::engine::{RandomSource, TableManager, TableService};
use blackjack_engine::infra::{DeterministicRng, EngineConfig, FileDeckSource, SystemRng};
use clap::Parser;
use tracing::info;

/// Мульти-табличный dev-CLI калькулятора блэкджека.
#[derive(Debug, Parser)]
#[command(name = "blackjack_dev_cli")]
struct Args {
    /// Файл с описанием колоды (иначе BLACKJACK_DECK_PATH или save.yaml).
    #[arg(long)]
    deck_path: Option<PathBuf>,

    /// Seed для воспроизводимых перемешиваний.
    #[arg(long)]
    seed: Option<u64>,

    /// Сколько столов создать на старте.
    #[arg(long)]
    tables: Option<usize>,

    /// Сразу выдавать новым столам стандартную колоду игрока.
    #[arg(long)]
    player_deck: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = EngineConfig::from_env();
    if let Some(path) = args.deck_path {
        config.deck_path = path;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(n) = args.tables {
        config.tables = n;
    }
    config.player_deck_on_create |= args.player_deck;

    info!(?config, "blackjack_dev_cli: старт");

    match config.seed {
        Some(seed) => run(config, DeterministicRng::from_u64(seed)).await,
        None => run(config, SystemRng).await,
    }
}

async fn run<R: RandomSource>(config: EngineConfig, rng: R) {
    let manager = TableManager::new(rng).with_player_deck_on_create(config.player_deck_on_create);
    let source = FileDeckSource::new(config.deck_path.clone());
    info!(deck_path = %source.path().display(), "источник колоды");
    let service = TableService::new(manager, source);

    for _ in 0..config.tables {
        let cmd = Command::CreateTable(CreateTableCommand::default());
        print_response(execute(&service, cmd).await);
    }

    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                println!("[CLI] ошибка чтения stdin: {err}");
                break;
            }
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            continue;
        };
        let rest: Vec<&str> = words.collect();

        match verb {
            "quit" | "exit" => break,
            "help" => print_help(),
            "tables" => {
                if let QueryResponse::Tables(views) = query(&service, Query::ListTables).await {
                    for view in &views {
                        print_table(view);
                    }
                }
            }
            "json" => {
                let snapshot = service.snapshot().await;
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(text) => println!("{text}"),
                    Err(err) => println!("[CLI] не удалось сериализовать: {err}"),
                }
            }
            "show" => match parse_id(&rest) {
                Some(table_id) => {
                    match query(&service, Query::GetTable { table_id }).await {
                        QueryResponse::Table(Some(view)) => print_table(&view),
                        _ => println!("[CLI] стол {table_id} не найден."),
                    }
                }
                None => println!("[CLI] нужен id стола."),
            },
            "new" => {
                let name = (!rest.is_empty()).then(|| rest.join(" "));
                let cmd = Command::CreateTable(CreateTableCommand { name });
                print_response(execute(&service, cmd).await);
            }
            _ => match parse_table_command(verb, &rest) {
                Some(cmd) => print_response(execute(&service, Command::TableCommand(cmd)).await),
                None => println!("[CLI] не понял команду, см. help."),
            },
        }
    }

    println!("[CLI] Завершение работы dev-CLI.");
}

fn parse_id(rest: &[&str]) -> Option<TableId> {
    rest.first().and_then(|s| s.parse().ok())
}

fn parse_table_command(verb: &str, rest: &[&str]) -> Option<TableCommand> {
    let table_id = parse_id(rest)?;
    let tail = rest[1..].join(" ");

    let cmd = match verb {
        "load" => TableCommand::LoadDeck { table_id },
        "std" => TableCommand::LoadStandardDeck { table_id },
        "shoe" => TableCommand::LoadDealerDeck { table_id },
        "draw" => TableCommand::DrawPlayerCard { table_id },
        "dealer" => TableCommand::DrawDealerCard { table_id },
        "both" => TableCommand::DrawBoth { table_id },
        "check" => TableCommand::Check { table_id, input: tail },
        "input" => TableCommand::UpdateInput { table_id, input: tail },
        "clear" => TableCommand::Clear { table_id },
        "reset" => TableCommand::ResetTable { table_id },
        "rm" => TableCommand::RemoveTable { table_id },
        _ => return None,
    };
    Some(cmd)
}

fn print_response(response: Result<CommandResponse, blackjack_engine::api::ApiError>) {
    match response {
        Ok(CommandResponse::TableCreated(view)) => {
            println!("[CLI] создан стол {}", view.table_id);
            print_table(&view);
        }
        Ok(CommandResponse::TableState(view)) => print_table(&view),
        Ok(CommandResponse::TableRemoved(id)) => println!("[CLI] стол {id} удалён."),
        Ok(CommandResponse::Ok) => println!("[CLI] стол не найден, ничего не изменилось."),
        Err(err) => println!("[CLI] !!! {}", err.message()),
    }
}

fn print_table(view: &TableViewDto) {
    println!("================ TABLE STATE ================");
    println!(
        "table_id={} name={} deck={} dealer_shoe={} loading={}",
        view.table_id, view.name, view.deck_remaining, view.dealer_deck_remaining, view.is_loading
    );
    println!(
        "player: {:?} -> {}",
        view.player_cards,
        describe(view.result.map(|r| (r.total, r.bust)))
    );
    println!(
        "dealer: {:?} -> {}",
        view.dealer_cards,
        describe(view.dealer.map(|r| (r.total, r.bust)))
    );
    if !view.input.is_empty() {
        println!("input: {}", view.input);
    }
    if let Some(err) = &view.load_error {
        println!("load_error: {err}");
    }
    println!("=============================================");
}

fn describe(result: Option<(u32, bool)>) -> String {
    match result {
        Some((total, true)) => format!("{total} (перебор)"),
        Some((total, false)) => total.to_string(),
        None => "-".to_string(),
    }
}

fn print_help() {
    println!("Команды:");
    println!("  tables | show <id> | json");
    println!("  new [имя] | rm <id>");
    println!("  load <id> | std <id> | shoe <id>");
    println!("  draw <id> | dealer <id> | both <id>");
    println!("  check <id> <карты...> | input <id> <текст> | clear <id> | reset <id>");
    println!("  help | quit");
}
