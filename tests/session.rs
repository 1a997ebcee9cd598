use edntree::build::DECODE_FAILED_PLACEHOLDER;
use edntree::context::SpecialContext;
use edntree::buffered_chars::CharResult;
use edntree::lexer::LexError;
use edntree::node::{Encoding, Node, RawText, TokenSource};
use edntree::pos::Pos;
use edntree::read::read_all;
use edntree::session::ReadSession;
use edntree::settings::Settings;
use edntree::value::{int, symbol, AtomKind, SequenceKind, Value, WrapperKind};
use kstring::KString;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Hands out a fixed list of nodes, then End; counts releases.
struct ScriptedSource {
    nodes: VecDeque<Node>,
    released: Rc<Cell<usize>>,
}

impl TokenSource for ScriptedSource {
    type State = usize;

    fn encoding(&self) -> Encoding {
        Encoding::Utf32Le
    }

    fn read_node(
        &mut self,
        _chars: &mut dyn Iterator<Item = CharResult>,
        calls: &mut usize,
    ) -> Node {
        *calls += 1;
        self.nodes.pop_front().unwrap_or(Node::End)
    }

    fn release(&mut self, node: Node) {
        self.released.set(self.released.get() + 1);
        drop(node)
    }
}

fn atom(kind: AtomKind, s: &str) -> Node {
    Node::atom(kind, s, Encoding::Utf32Le)
}

fn error_node() -> Node {
    Node::Error(LexError::Source("boom".to_string()).at(Pos::default()))
}

fn session(nodes: Vec<Node>, settings: &Settings)
           -> (ReadSession<'static, ScriptedSource>, Rc<Cell<usize>>) {
    let released = Rc::new(Cell::new(0));
    let source = ScriptedSource {
        nodes: nodes.into(),
        released: released.clone(),
    };
    (ReadSession::new(std::io::empty(),
                      Box::new(SpecialContext::new("script")),
                      source,
                      settings),
     released)
}

fn read_nodes(nodes: Vec<Node>) -> Vec<Value> {
    read_all(session(nodes, &Settings::default()).0)
}

fn only_error(msg: &str) -> Vec<Value> {
    vec![Value::error(msg)]
}

#[test]
fn decodes_utf32_text() {
    assert_eq!(read_nodes(vec![atom(AtomKind::Symbol, "héllo→"),
                               atom(AtomKind::Int, "12")]),
               vec![symbol("héllo→"), int("12")]);
}

#[test]
fn undecodable_text_becomes_placeholder() {
    let bad = vec![
        // not a multiple of 4 bytes
        Node::Atom(AtomKind::String, RawText(vec![0x41, 0, 0])),
        // a surrogate code point
        Node::Atom(AtomKind::Symbol, RawText(vec![0x00, 0xd8, 0, 0])),
        atom(AtomKind::Int, "1"),
    ];
    assert_eq!(read_nodes(bad),
               vec![Value::String(KString::from_static(DECODE_FAILED_PLACEHOLDER)),
                    symbol(DECODE_FAILED_PLACEHOLDER),
                    int("1")]);
}

#[test]
fn every_node_is_released_once() {
    let (s, released) = session(vec![atom(AtomKind::Int, "1"),
                                     atom(AtomKind::Int, "2")],
                                &Settings::default());
    assert_eq!(read_all(s).len(), 2);
    // two atoms and the End
    assert_eq!(released.get(), 3);

    let (s, released) = session(vec![atom(AtomKind::Int, "1"), error_node(),
                                     atom(AtomKind::Int, "2")],
                                &Settings::default());
    assert_eq!(read_all(s), only_error("error encountered while parsing"));
    assert_eq!(released.get(), 2);
}

#[test]
fn builds_all_compound_kinds() {
    let node = Node::Sequence(SequenceKind::Vector, vec![
        Node::Sequence(SequenceKind::Set, vec![atom(AtomKind::Keyword, "k")]),
        Node::Dictionary(vec![(atom(AtomKind::Char, "a"), atom(AtomKind::Float, "1.0"))]),
        Node::Tagged(Box::new(atom(AtomKind::Symbol, "t")),
                     Box::new(atom(AtomKind::String, "s"))),
        Node::Wrapper(WrapperKind::UnquoteSplice,
                      Box::new(Node::Sequence(SequenceKind::List, vec![]))),
    ]);
    let v = read_nodes(vec![node]);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].describe(),
               "Vector<[Set<[Keyword<k>]>, \
                Dictionary<[Entry<Char<a>,Float<1.0>>]>, \
                Tagged<Symbol<t>,String<s>>, \
                UnquoteSplice<List<[]>>]>");
}

#[test]
fn nested_error_fails_the_whole_form() {
    let node = Node::Sequence(SequenceKind::List,
                              vec![atom(AtomKind::Int, "1"), error_node()]);
    assert_eq!(read_nodes(vec![atom(AtomKind::Int, "0"), node]),
               only_error("error encountered while parsing"));
}

#[test]
fn nested_end_is_an_error() {
    let node = Node::Wrapper(WrapperKind::Quote, Box::new(Node::End));
    assert_eq!(read_nodes(vec![node]),
               only_error("unexpected end of input inside a form"));
}

#[test]
fn tag_must_be_a_symbol() {
    let node = Node::Tagged(Box::new(atom(AtomKind::Int, "1")),
                            Box::new(atom(AtomKind::Int, "2")));
    assert_eq!(read_nodes(vec![node]),
               only_error("tag of tagged literal is not a symbol"));
}

#[test]
fn unknown_kinds() {
    assert_eq!(read_nodes(vec![Node::Unknown(99)]),
               only_error("unknown value kind"));
    let node = Node::Dictionary(vec![(
        Node::UnknownAtom(7, RawText(vec![])),
        atom(AtomKind::Int, "1"))]);
    assert_eq!(read_nodes(vec![node]), only_error("unknown primitive value"));
}

#[test]
fn builder_depth_limit() {
    let mut node = atom(AtomKind::Int, "1");
    for _ in 0..10 {
        node = Node::Wrapper(WrapperKind::Deref, Box::new(node));
    }
    let ten = Settings { max_depth: 10, ..Settings::default() };
    let nine = Settings { max_depth: 9, ..Settings::default() };
    let (s, _) = session(vec![node], &nine);
    assert_eq!(read_all(s), only_error("nesting too deep"));

    let mut node = atom(AtomKind::Int, "1");
    for _ in 0..10 {
        node = Node::Wrapper(WrapperKind::Deref, Box::new(node));
    }
    let (s, _) = session(vec![node], &ten);
    let v = read_all(s);
    assert_eq!(v.len(), 1);
    assert!(!v[0].is_sentinel());
}

#[test]
fn iterating_a_session() {
    let (mut s, _) = session(vec![atom(AtomKind::Int, "1"),
                                  atom(AtomKind::Int, "2")],
                             &Settings::default());
    assert_eq!((&mut s).collect::<Vec<_>>(), vec![int("1"), int("2")]);
    assert_eq!(s.next(), None);

    let (s, _) = session(vec![atom(AtomKind::Int, "1"), error_node(),
                              atom(AtomKind::Int, "2")],
                         &Settings::default());
    assert_eq!(s.collect::<Vec<_>>(),
               vec![int("1"), Value::error("error encountered while parsing")]);
}

#[test]
fn reading_past_the_end_stays_at_end() {
    let (mut s, _) = session(vec![], &Settings::default());
    assert_eq!(s.read_next(), Value::End);
    assert_eq!(s.read_next(), Value::End);
    s.close();
}

#[test]
fn diagnostic_names_input_and_position() {
    let mut s = ReadSession::from_reader("[1\n (2]".as_bytes(), &Settings::default());
    assert_eq!(s.read_next(), Value::error("error encountered while parsing"));
    assert_eq!(s.last_diagnostic(),
               Some("'(' @2.1 expects ')', got ']' from (reader)@2.3"));
    // the lexer does not continue after an error
    assert_eq!(s.read_next(), Value::End);
}
