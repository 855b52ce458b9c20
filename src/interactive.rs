use std::io::{self, BufRead, Write};

use blockgrid_catalog::Catalog;
use blockgrid_weights::Palette;

use crate::render::terminal::{TermStyle, write_grid, write_groups};
use crate::session::Session;
use crate::tiles::render_session;

const HELP: &str = "\
commands (groups are numbered from 1):
  show                   redraw the grid
  roll                   re-random and redraw
  width <n> | height <n> set grid size
  add <group> <id>...    append blocks to a group
  remove <group> <id>    remove a block from a group
  set <group> <id>...    replace a group's blocks
  chance <group> [text]  set a group's chance (empty = auto)
  drop <group>           delete a group
  search [text]          list catalog blocks matching text
  pick <n>               add search result n to the selection pool
  groups                 list groups and weights
  help | quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented stand-in for the single-screen form.
pub struct Interactive<'a> {
    pub session: Session,
    catalog: &'a Catalog,
    palette: &'a Palette,
    style: TermStyle,
    last_search: Vec<String>,
}

fn parse_group(tok: Option<&str>) -> Option<usize> {
    tok?.parse::<usize>().ok()?.checked_sub(1)
}

impl<'a> Interactive<'a> {
    pub fn new(
        session: Session,
        catalog: &'a Catalog,
        palette: &'a Palette,
        style: TermStyle,
    ) -> Self {
        Self {
            session,
            catalog,
            palette,
            style,
            last_search: Vec::new(),
        }
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        self.redraw(out)?;
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            if self.execute(&line?, out)? == Flow::Quit {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn redraw(&self, out: &mut impl Write) -> io::Result<()> {
        let grid = render_session(&self.session, self.catalog, self.palette);
        write_grid(out, &grid, self.style)?;
        write_groups(out, &self.session)
    }

    fn warn_unknown(&self, out: &mut impl Write, id: &str) -> io::Result<()> {
        if !self.catalog.contains(id) {
            log::warn!(target: "session", "{} is not in the catalog; it will draw as a color", id);
            writeln!(out, "note: {} has no image; a fallback color is used", id)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();
        let edited = match cmd {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => {
                writeln!(out, "{}", HELP)?;
                false
            }
            "show" => true,
            "groups" => {
                write_groups(out, &self.session)?;
                false
            }
            "roll" | "r" => {
                self.session.roll();
                true
            }
            "width" => {
                self.session.set_width_text(rest);
                true
            }
            "height" => {
                self.session.set_height_text(rest);
                true
            }
            "add" | "set" | "remove" | "chance" | "drop" => {
                let Some(group) = parse_group(args.next()) else {
                    writeln!(out, "usage: {} <group> ...", cmd)?;
                    return Ok(Flow::Continue);
                };
                let ids: Vec<&str> = args.collect();
                let ok = match cmd {
                    "add" if group >= self.session.groups().len() => false,
                    "add" => {
                        for id in &ids {
                            self.warn_unknown(out, id)?;
                        }
                        !ids.is_empty() && ids.iter().all(|id| self.session.add_block(group, id))
                    }
                    "set" => self.session.set_blocks_text(group, &ids.join("\n")),
                    "remove" => ids.first().is_some_and(|id| self.session.remove_block(group, id)),
                    "chance" => self.session.set_chance(group, &ids.join(" ")),
                    _ => self.session.remove_group(group),
                };
                if !ok {
                    writeln!(out, "{}: nothing changed (check the group number and block)", cmd)?;
                }
                ok
            }
            "search" => {
                self.last_search = self
                    .catalog
                    .search(rest)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if self.last_search.is_empty() {
                    writeln!(out, "no matches")?;
                }
                for (i, id) in self.last_search.iter().enumerate() {
                    writeln!(out, "  {:>3}. {}", i + 1, id)?;
                }
                false
            }
            "pick" => {
                let picked = args
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.last_search.get(i))
                    .cloned();
                match picked {
                    Some(id) => {
                        let group = self.session.add_to_pool(&id);
                        writeln!(out, "added {} to group {}", id, group + 1)?;
                        true
                    }
                    None => {
                        writeln!(out, "pick: no such search result")?;
                        false
                    }
                }
            }
            other => {
                writeln!(out, "unknown command {:?}; try help", other)?;
                false
            }
        };
        if edited {
            self.redraw(out)?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_entries([
            ("log_spruce", "log_spruce.png"),
            ("planks_spruce", "planks_spruce.png"),
            ("stone", "stone.png"),
        ])
    }

    fn plain() -> TermStyle {
        TermStyle {
            color: false,
            cell_width: 10,
        }
    }

    fn run_script(script: &str) -> (Session, String) {
        let catalog = catalog();
        let palette = Palette::default();
        let mut repl = Interactive::new(Session::new(8), &catalog, &palette, plain());
        let mut out = Vec::new();
        repl.run(script.as_bytes(), &mut out).unwrap();
        (repl.session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn edits_reach_the_session() {
        let (s, _) =
            run_script("width 3\nheight 2\nset 1 stone\nchance 1 40\nadd 2 planks_spruce\nquit\n");
        assert_eq!((s.width(), s.height()), (3, 2));
        assert_eq!(s.groups()[0].blocks, vec!["stone"]);
        assert_eq!(s.groups()[0].chance, "40");
        assert_eq!(s.groups()[1].blocks, vec!["planks_spruce"]);
        assert!(s.groups()[2].is_empty());
    }

    #[test]
    fn search_then_pick_adds_to_pool() {
        let (s, out) = run_script("search SPRUCE\npick 2\n");
        assert!(out.contains("    1. log_spruce\n"));
        assert!(out.contains("    2. planks_spruce\n"));
        assert!(out.contains("added planks_spruce to group 1"));
        assert_eq!(s.groups()[0].blocks.last().unwrap(), "planks_spruce");
    }

    #[test]
    fn roll_advances_token() {
        let (s, _) = run_script("roll\nr\n");
        assert_eq!(s.roll_token(), 2);
    }

    #[test]
    fn bad_input_does_not_panic() {
        let (s, out) = run_script("add\nadd 0 x\npick 7\nchance 9 10\nbogus\nwidth -5\n");
        assert!(out.contains("usage: add"));
        assert!(out.contains("pick: no such search result"));
        assert!(out.contains("chance: nothing changed"));
        assert!(out.contains("unknown command \"bogus\""));
        assert_eq!(s.width(), 1);
    }

    #[test]
    fn unknown_blocks_are_allowed_with_a_note() {
        let (s, out) = run_script("add 1 mystery\n");
        assert!(out.contains("note: mystery has no image"));
        assert!(s.groups()[0].blocks.contains(&"mystery".to_string()));
    }

    #[test]
    fn add_to_missing_group_skips_the_image_note() {
        let (s, out) = run_script("add 9 mystery
");
        assert!(out.contains("add: nothing changed"));
        assert!(!out.contains("note: mystery"));
        assert!(s.groups().iter().all(|g| !g.blocks.contains(&"mystery".to_string())));
    }
}
