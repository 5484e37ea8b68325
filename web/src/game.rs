use crate::utils::*;
use clap::Args;
use lights_out_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Toggle(game::Coord2),
    NewGame,
}

/// `hint` marks every press of the solution, `next` the one to make first.
fn cell_class(lit: bool, hint: bool, next: bool) -> Classes {
    classes!(
        "cell",
        lit.then_some("lit"),
        hint.then_some("hint"),
        next.then_some("next")
    )
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    lit: bool,
    #[prop_or_default]
    hint: bool,
    #[prop_or_default]
    next: bool,
    /// Toggles around the cell this view was created for.
    on_flip: Callback<()>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        lit,
        hint,
        next,
        on_flip,
    } = props.clone();

    let class = cell_class(lit, hint, next);
    let onclick = Callback::from(move |_: MouseEvent| on_flip.emit(()));

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct BoardProps {
    /// Number of rows
    #[arg(long, default_value_t = game::BoardConfig::DEFAULT_SIZE.0,
          value_parser = clap::value_parser!(u8).range(1..))]
    rows: game::Coord,

    /// Number of columns
    #[arg(long, default_value_t = game::BoardConfig::DEFAULT_SIZE.1,
          value_parser = clap::value_parser!(u8).range(1..))]
    cols: game::Coord,

    /// Chance for each light to start lit, between 0 and 1
    #[arg(long, default_value_t = game::BoardConfig::DEFAULT_CHANCE)]
    chance: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only deal boards that can be won
    #[arg(long)]
    solvable: bool,

    /// Highlight the cells that still need to be pressed
    #[arg(long)]
    hints: bool,
}

impl BoardProps {
    fn config(&self) -> game::BoardConfig {
        game::BoardConfig::new((self.rows, self.cols), self.chance)
    }

    fn generator(&self, seed: u64) -> game::RandomGridGenerator {
        let policy = if self.solvable {
            game::StartPolicy::Solvable
        } else {
            game::StartPolicy::Random
        };
        game::RandomGridGenerator::new(seed, policy)
    }
}

/// `(hint, next)` flags for a cell, both unset when hints are off or the
/// board cannot be won.
fn hint_marks(analysis: Option<&game::Analysis>, pos: game::Coord2) -> (bool, bool) {
    let Some(analysis) = analysis else {
        return (false, false);
    };
    let hint = analysis.solution().is_some_and(|solution| solution.contains(pos));
    (hint, analysis.hint() == Some(pos))
}

/// Applies a cell activation, returns whether the board needs a re-render.
fn toggle_cell(board: &mut game::GameBoard, pos: game::Coord2) -> bool {
    match board.toggle_around(pos) {
        Ok(game::ToggleOutcome::Won) => {
            log::info!("won in {} moves", board.move_count());
            true
        }
        Ok(game::ToggleOutcome::Toggled) => true,
        Err(err) => {
            log::warn!("ignored toggle at {:?}: {}", pos, err);
            false
        }
    }
}

#[derive(Debug)]
pub(crate) struct BoardView {
    board: game::GameBoard,
    seed: u64,
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(new_game_seed);
        log::debug!("seed: {}", seed);

        Self {
            board: game::GameBoard::new(props.config(), props.generator(seed)),
            seed,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        log::trace!("msg: {:?}", msg);
        match msg {
            Toggle(pos) => toggle_cell(&mut self.board, pos),
            NewGame => {
                self.seed = new_game_seed();
                log::debug!("new game, seed: {}", self.seed);
                self.board.restart(ctx.props().generator(self.seed));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);

        if self.board.has_won() {
            return html! {
                <div class="lights-out won">
                    <p>{"You won!"}</p>
                    <button onclick={cb_new_game}>{"New game"}</button>
                </div>
            };
        }

        let (rows, cols) = self.board.size();
        let analysis = ctx.props().hints.then(|| self.board.analyze());
        let unsolvable = analysis.as_ref().is_some_and(|analysis| !analysis.is_solvable());

        html! {
            <div class="lights-out">
                <nav>
                    <aside>{format!("Moves: {}", self.board.move_count())}</aside>
                    <button onclick={cb_new_game}>{"New game"}</button>
                </nav>
                <table class="playable">
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = (row, col);
                                        let lit = self.board.cell_at(pos);
                                        let (hint, next) = hint_marks(analysis.as_ref(), pos);
                                        let on_flip = ctx.link().callback(move |()| Msg::Toggle(pos));
                                        html! {
                                            <CellView {lit} {hint} {next} {on_flip}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if unsolvable {
                    <small>{"This board cannot be won, try a new game"}</small>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        board: BoardProps,
    }

    fn props(args: &[&str]) -> BoardProps {
        TestArgs::try_parse_from(std::iter::once("").chain(args.iter().copied()))
            .unwrap()
            .board
    }

    #[test]
    fn defaults_match_core_config() {
        let props = props(&[]);

        assert_eq!(props.config(), game::BoardConfig::default());
        assert_eq!(props.seed, None);
        assert!(!props.hints);
    }

    #[test]
    fn hash_options_override_defaults() {
        let props = props(&["--rows=3", "--cols=8", "--chance=0.9", "-s", "42", "--solvable"]);

        assert_eq!(props.config(), game::BoardConfig::new((3, 8), 0.9));
        assert_eq!(props.seed, Some(42));
        assert_eq!(
            props.generator(42),
            game::RandomGridGenerator::new(42, game::StartPolicy::Solvable)
        );
    }

    #[test]
    fn zero_rows_are_rejected() {
        let parsed = TestArgs::try_parse_from(["", "--rows=0"]);

        assert!(parsed.is_err());
    }

    #[test]
    fn out_of_range_chance_is_clamped() {
        assert_eq!(props(&["--chance=3"]).config().chance_light_starts_on, 1.0);
    }

    #[test]
    fn toggle_cell_rerenders_only_on_accepted_moves() {
        let mut board = game::GameBoard::from_grid("O.O\n...\nO.O".parse().unwrap());

        assert!(!toggle_cell(&mut board, (3, 0)));
        assert!(toggle_cell(&mut board, (1, 1)));
        assert!(board.has_won());
        assert!(!toggle_cell(&mut board, (1, 1)));
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn cell_class_marks_lit_and_hint() {
        assert_eq!(cell_class(false, false, false), classes!("cell"));
        assert_eq!(cell_class(true, false, false), classes!("cell", "lit"));
        assert_eq!(cell_class(true, true, false), classes!("cell", "lit", "hint"));
        assert_eq!(
            cell_class(false, true, true),
            classes!("cell", "hint", "next")
        );
    }

    #[test]
    fn hint_marks_flag_the_first_press_as_next() {
        // presses at (0, 0) and (2, 2) light everything
        let grid: game::Grid = "..O\n.O.\nO..".parse().unwrap();
        let analysis = game::analyze(&grid);

        assert_eq!(hint_marks(Some(&analysis), (0, 0)), (true, true));
        assert_eq!(hint_marks(Some(&analysis), (2, 2)), (true, false));
        assert_eq!(hint_marks(Some(&analysis), (1, 1)), (false, false));
        assert_eq!(hint_marks(None, (0, 0)), (false, false));
    }
}
