use std::io::{self, BufRead, Write};

use breakthrough_engine::agent::{
    Agent, Difficulty, MctsAgent, MctsConfig, NegamaxAgent, RandomAgent, ThinkLimit,
};
use breakthrough_engine::game_repr::{zobrist, Color, GameState, Move, Outcome, Position};
use clap::{Parser, ValueEnum};

/// Which searcher plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Negamax,
    Mcts,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

/// Breakthrough engine with a line-based command loop.
#[derive(Parser)]
#[command(author, version, about = "Breakthrough engine (alpha-beta and MCTS)")]
struct Args {
    /// Agent playing white
    #[arg(long, value_enum, default_value_t = AgentKind::Negamax)]
    white: AgentKind,

    /// Agent playing black
    #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
    black: AgentKind,

    /// Depth limit (negamax) or simulation count (MCTS), 0 = unlimited
    #[arg(long)]
    depth: Option<u32>,

    /// Node limit, 0 = unlimited
    #[arg(long)]
    nodes: Option<u64>,

    /// Time limit per move in milliseconds, 0 = unlimited
    #[arg(long)]
    time_ms: Option<u64>,

    /// Preset limits for negamax agents
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Seed for reproducible agents
    #[arg(long)]
    seed: Option<u64>,

    /// Log search progress at debug level only
    #[arg(short, long)]
    quiet: bool,

    /// Initial board string
    #[arg(long)]
    setup: Option<String>,
}

const DEFAULT_TIME_MS: u64 = 1000;

const HELP: &str = "\
h                 this help
i [board [side]]  new game, optionally from a board string
m <move>          make a move, e.g. a2-a3 or d4xe5
r                 retract the last move
d [on|off]        show the board, or toggle showing it after every move
l <n>             depth (negamax) or simulation (MCTS) limit, 0 = none
t <ms>            time limit per move, 0 = none
n <nodes>         node limit, 0 = none
v                 toggle search output
g                 let the side to move play
a <n>             autoplay n pairs of games from the current setup
q                 quit";

struct Driver {
    pos: Position,
    start: Position,
    history: Vec<Move>,
    agents: [Box<dyn Agent>; 2],
    /// Per slot, white first
    limits: [ThinkLimit; 2],
    auto_display: bool,
    verbose: bool,
}

impl Driver {
    fn new(args: &Args) -> Self {
        let kinds = [args.white, args.black];
        let agents = [
            build_agent(args.white, args.seed),
            build_agent(args.black, args.seed.map(|s| s.wrapping_add(1))),
        ];

        let mut driver = Self {
            pos: Position::new(),
            start: Position::new(),
            history: Vec::new(),
            agents,
            limits: kinds.map(|kind| think_limit_for(kind, args)),
            auto_display: false,
            verbose: !args.quiet,
        };
        driver.configure_agents();
        driver
    }

    fn configure_agents(&mut self) {
        for (agent, limit) in self.agents.iter_mut().zip(self.limits) {
            agent.set_think_limit(limit);
            agent.set_silence(!self.verbose);
        }
    }

    fn update_limits(&mut self, update: impl Fn(&mut ThinkLimit)) {
        self.limits.iter_mut().for_each(update);
        self.configure_agents();
    }

    /// Returns false when the loop should stop.
    fn execute(&mut self, line: &str) -> bool {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return true;
        };
        let rest: Vec<&str> = words.collect();

        match cmd {
            "h" => println!("{HELP}"),
            "i" => self.init(&rest),
            "m" => self.make_user_move(&rest),
            "r" => {
                if let Some(mv) = self.history.pop() {
                    self.pos.retract(mv);
                    self.show_if_auto();
                } else {
                    log::warn!("nothing to retract");
                }
            }
            "d" => match rest.first().copied() {
                None => println!("{}", self.pos.diagram()),
                Some("on") => self.auto_display = true,
                Some("off") => self.auto_display = false,
                Some(other) => log::warn!("expected on or off, got {other}"),
            },
            "l" => {
                if let Some(n) = parse_arg(&rest) {
                    self.update_limits(|limit| limit.limit = n);
                }
            }
            "t" => {
                if let Some(ms) = parse_arg(&rest) {
                    self.update_limits(|limit| limit.max_time_ms = ms);
                }
            }
            "n" => {
                if let Some(nodes) = parse_arg(&rest) {
                    self.update_limits(|limit| limit.max_nodes = nodes);
                }
            }
            "v" => {
                self.verbose = !self.verbose;
                self.configure_agents();
                println!("verbose {}", if self.verbose { "on" } else { "off" });
            }
            "g" => self.go(),
            "a" => {
                if let Some(pairs) = parse_arg(&rest) {
                    self.autoplay(pairs);
                }
            }
            "q" => return false,
            other => log::warn!("unknown command '{other}', type h for help"),
        }
        true
    }

    fn init(&mut self, rest: &[&str]) {
        if rest.is_empty() {
            self.pos.reset();
        } else {
            let board = rest.join(" ");
            let mut candidate = self.pos;
            if let Err(e) = candidate.setup(&board) {
                log::error!("invalid board: {e}");
                return;
            }
            self.pos = candidate;
        }
        self.start = self.pos;
        self.history.clear();
        self.show_if_auto();
    }

    fn make_user_move(&mut self, rest: &[&str]) {
        let Some(text) = rest.first() else {
            log::warn!("usage: m <move>");
            return;
        };
        if self.pos.is_terminal() {
            log::warn!("game is over");
            return;
        }
        match self.pos.legal_move_from_notation(text) {
            Some(mv) => {
                self.pos.make(mv);
                self.history.push(mv);
                self.show_if_auto();
                self.report_game_over();
            }
            None => log::warn!("illegal move {text}"),
        }
    }

    fn go(&mut self) {
        if self.pos.is_terminal() {
            self.report_game_over();
            return;
        }
        let side = self.pos.side_to_move().index();
        match self.agents[side].play_move(&self.pos) {
            Some(mv) => {
                println!("bestmove {mv}");
                self.pos.make(mv);
                self.history.push(mv);
                self.show_if_auto();
                self.report_game_over();
            }
            None => log::error!("{} found no move", self.agents[side].name()),
        }
    }

    fn report_game_over(&self) {
        if let Some(winner) = winner(&self.pos) {
            let score = match winner {
                Color::White => "1-0",
                Color::Black => "0-1",
            };
            println!("gameover {score}");
        }
    }

    /// Plays `pairs` games with each agent as white, then as black.
    fn autoplay(&mut self, pairs: u32) {
        let names = [self.agents[0].name().to_string(), self.agents[1].name().to_string()];
        let mut wins = [0u32; 2];

        for game in 0..pairs * 2 {
            // Agent slot that plays white in this game
            let white_slot = (game % 2) as usize;
            let mut pos = self.start;
            while !pos.is_terminal() {
                let slot = match pos.side_to_move() {
                    Color::White => white_slot,
                    Color::Black => 1 - white_slot,
                };
                match self.agents[slot].play_move(&pos) {
                    Some(mv) => pos.make(mv),
                    None => break,
                }
            }

            if let Some(winner) = winner(&pos) {
                let slot = match winner {
                    Color::White => white_slot,
                    Color::Black => 1 - white_slot,
                };
                wins[slot] += 1;
                log::info!("game {}: {} wins as {:?}", game + 1, names[slot], winner);
            }
        }

        println!("{}: {}  {}: {}", names[0], wins[0], names[1], wins[1]);
    }

    fn show_if_auto(&self) {
        if self.auto_display {
            println!("{}", self.pos.diagram());
        }
    }
}

/// Think limit for one slot. Difficulty presets only apply to negamax; the
/// explicit flags override them.
fn think_limit_for(kind: AgentKind, args: &Args) -> ThinkLimit {
    let mut limit = match (kind, args.difficulty) {
        (AgentKind::Negamax, Some(d)) => Difficulty::from(d).think_limit(),
        _ => ThinkLimit {
            max_time_ms: DEFAULT_TIME_MS,
            ..ThinkLimit::default()
        },
    };
    if let Some(depth) = args.depth {
        limit.limit = depth;
    }
    if let Some(nodes) = args.nodes {
        limit.max_nodes = nodes;
    }
    if let Some(ms) = args.time_ms {
        limit.max_time_ms = ms;
    }
    limit
}

fn build_agent(kind: AgentKind, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        AgentKind::Negamax => {
            let agent = NegamaxAgent::new();
            Box::new(match seed {
                Some(s) => agent.with_seed(s),
                None => agent,
            })
        }
        AgentKind::Mcts => Box::new(match seed {
            Some(s) => MctsAgent::with_seed(MctsConfig::default(), s),
            None => MctsAgent::default(),
        }),
        AgentKind::Random => Box::new(match seed {
            Some(s) => RandomAgent::with_seed(s),
            None => RandomAgent::new(),
        }),
    }
}

/// Side that won, if the game is over.
fn winner(pos: &Position) -> Option<Color> {
    match pos.result() {
        Outcome::Loss => Some(pos.side_to_move().opposite()),
        Outcome::Win => Some(pos.side_to_move()),
        Outcome::Unknown => None,
    }
}

fn parse_arg<T: std::str::FromStr>(rest: &[&str]) -> Option<T> {
    let parsed = rest.first().and_then(|s| s.parse().ok());
    if parsed.is_none() {
        log::warn!("expected a number");
    }
    parsed
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
    zobrist::init();

    let args = Args::parse();
    let mut driver = Driver::new(&args);

    if let Some(board) = &args.setup {
        if let Err(e) = driver.pos.setup(board) {
            log::error!("invalid --setup board: {e}");
            std::process::exit(1);
        }
        driver.start = driver.pos;
    }

    log::info!(
        "white: {}, black: {}",
        driver.agents[0].name(),
        driver.agents[1].name()
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if !driver.execute(line.trim()) {
            break;
        }
        let _ = io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flags: &[&str]) -> Args {
        Args::parse_from(std::iter::once("breakthrough").chain(flags.iter().copied()))
    }

    #[test]
    fn test_difficulty_only_limits_negamax() {
        let args = args(&["--difficulty", "easy", "--white", "negamax", "--black", "mcts"]);

        let negamax = think_limit_for(AgentKind::Negamax, &args);
        let mcts = think_limit_for(AgentKind::Mcts, &args);

        assert_eq!(negamax, Difficulty::Easy.think_limit());
        assert_eq!(
            mcts,
            ThinkLimit {
                limit: 0,
                max_nodes: 0,
                max_time_ms: DEFAULT_TIME_MS,
            }
        );
    }

    #[test]
    fn test_explicit_flags_override_preset() {
        let args = args(&["--difficulty", "expert", "--depth", "3", "--time-ms", "250"]);

        let negamax = think_limit_for(AgentKind::Negamax, &args);
        let random = think_limit_for(AgentKind::Random, &args);

        assert_eq!(negamax.limit, 3);
        assert_eq!(negamax.max_time_ms, 250);
        assert_eq!(random.limit, 3);
        assert_eq!(random.max_time_ms, 250);
    }

    #[test]
    fn test_driver_keeps_separate_limits_per_slot() {
        let args = args(&["--difficulty", "medium", "--black", "mcts"]);
        let mut driver = Driver::new(&args);

        assert_eq!(driver.limits[0].limit, 4);
        assert_eq!(driver.limits[1].limit, 0);
        assert_eq!(driver.limits[1].max_time_ms, DEFAULT_TIME_MS);

        driver.execute("n 500");
        assert!(driver.limits.iter().all(|l| l.max_nodes == 500));
        assert_eq!(driver.limits[0].limit, 4);
    }
}
