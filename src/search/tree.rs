//! Search tree stored in an arena. Children are owned by the tree and referred
//! to by index, parents are looked up the same way, so there are no ownership
//! cycles.

use crate::environment::Player;
use crate::search::random::RandomSource;

/// Position of a node in the [`Tree`] arena.
pub type NodeIndex = usize;
// This is a special value that is used to indicate that the node has no parent.
pub(crate) const TOMBSTONE_PARENT: NodeIndex = usize::MAX;

/// State reached by playing [`Node::action`] as [`Node::player`] from the
/// parent's state.
///
/// Statistics are kept from the perspective of the player who made the move,
/// i.e. they answer "how good was it for me to play this", not "how good is
/// this for the player to move".
#[derive(Clone, Debug)]
pub struct Node<A> {
    parent: NodeIndex,
    children: Vec<NodeIndex>,
    /// `None` for the root.
    action: Option<A>,
    player: Player,
    visits: u32,
    /// Wins count 1, draws count 0.5, losses count 0.
    value: f64,
}

impl<A: Copy> Node<A> {
    const fn new(parent: NodeIndex, action: Option<A>, player: Player) -> Self {
        Self {
            parent,
            children: Vec::new(),
            action,
            player,
            visits: 0,
            value: 0.0,
        }
    }

    /// Returns `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeIndex> {
        if self.parent == TOMBSTONE_PARENT {
            None
        } else {
            Some(self.parent)
        }
    }

    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[must_use]
    pub const fn action(&self) -> Option<A> {
        self.action
    }

    /// The player who made [`Node::action`].
    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    #[must_use]
    pub const fn visits(&self) -> u32 {
        self.visits
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / f64::from(self.visits)
        }
    }

    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visits > 0
    }

    /// Scores a finished game for this node's player.
    pub fn update_value(&mut self, winner: Option<Player>) {
        match winner {
            Some(winner) if winner == self.player => self.value += 1.0,
            None => self.value += 0.5,
            Some(_) => {},
        }
    }

    pub(crate) fn record_visit(&mut self) {
        self.visits += 1;
    }

    /// [UCB1] score of this node in a search that has completed `round`
    /// rounds.
    ///
    /// Unvisited nodes score [`f64::MAX`] so that every child is tried once
    /// before any of them is exploited.
    ///
    /// [UCB1]: https://www.chessprogramming.org/UCT
    #[must_use]
    pub fn upper_confidence_bound(&self, round: u32, temperature: f64) -> f64 {
        if self.visits == 0 {
            return f64::MAX;
        }
        let visits = f64::from(self.visits);
        // ln(0) is undefined, the first round never scores visited nodes anyway.
        let rounds = f64::from(round.max(1));
        self.value / visits + temperature * (rounds.ln() / visits).sqrt()
    }
}

/// Arena of [`Node`]s rooted at index 0.
#[derive(Clone, Debug)]
pub struct Tree<A> {
    nodes: Vec<Node<A>>,
}

impl<A: Copy> Tree<A> {
    /// Creates a tree with a single root. `player` is the one who made the
    /// last move in the root position, i.e. the opponent of the player to
    /// move.
    #[must_use]
    pub fn new(player: Player) -> Self {
        Self {
            nodes: vec![Node::new(TOMBSTONE_PARENT, None, player)],
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeIndex {
        0
    }

    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node<A> {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node<A> {
        &mut self.nodes[index]
    }

    /// Total number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: there is at least the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates one child per action, in the given order. Children belong to
    /// the opponent of the expanded node's player.
    pub fn expand(&mut self, index: NodeIndex, actions: &[A]) {
        debug_assert!(self.nodes[index].children.is_empty());
        let player = !self.nodes[index].player;
        for &action in actions {
            let child = self.nodes.len();
            self.nodes.push(Node::new(index, Some(action), player));
            self.nodes[index].children.push(child);
        }
    }

    /// Returns the child with the highest [`Node::upper_confidence_bound`], or
    /// `None` if `index` has no children.
    ///
    /// Children are scanned in order. A child scoring exactly as much as the
    /// current best replaces it if a coin flip says so; this is not a uniform
    /// draw among all tied children.
    pub fn select_best_child(
        &self,
        index: NodeIndex,
        round: u32,
        temperature: f64,
        rng: &mut impl RandomSource,
    ) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f64)> = None;
        for &child in &self.nodes[index].children {
            let score = self.nodes[child].upper_confidence_bound(round, temperature);
            match best {
                None => best = Some((child, score)),
                Some((_, best_score)) if score > best_score => best = Some((child, score)),
                // Exact ties are what the coin flip is for.
                #[allow(clippy::float_cmp)]
                Some((_, best_score)) if score == best_score && rng.flip_coin() => {
                    best = Some((child, score));
                },
                Some(_) => {},
            }
        }
        best.map(|(child, _)| child)
    }

    /// Child of the root with the best mean value, unvisited children first.
    #[must_use]
    pub fn best_action(&self, rounds: u32, rng: &mut impl RandomSource) -> Option<A> {
        self.select_best_child(self.root(), rounds, 0.0, rng)
            .and_then(|child| self.nodes[child].action)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Replays a fixed list of coin flips and panics when it runs out.
    struct Scripted {
        flips: VecDeque<bool>,
    }

    impl Scripted {
        fn new(flips: &[bool]) -> Self {
            Self {
                flips: flips.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for Scripted {
        fn flip_coin(&mut self) -> bool {
            self.flips.pop_front().expect("unexpected coin flip")
        }

        fn pick(&mut self, _: usize) -> usize {
            panic!("tree selection never picks")
        }
    }

    fn tree_with_children(count: u8) -> Tree<u8> {
        let mut tree = Tree::new(Player::Two);
        tree.node_mut(tree.root()).record_visit();
        tree.expand(tree.root(), &(0..count).collect::<Vec<_>>());
        tree
    }

    fn visit(tree: &mut Tree<u8>, index: NodeIndex, times: u32, winner: Option<Player>) {
        for _ in 0..times {
            let node = tree.node_mut(index);
            node.update_value(winner);
            node.record_visit();
        }
    }

    #[test]
    fn root() {
        let tree = Tree::<u8>::new(Player::Two);
        assert_eq!(tree.len(), 1);
        let root = tree.node(tree.root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.action(), None);
        assert_eq!(root.player(), Player::Two);
        assert!(!root.visited());
    }

    #[test]
    fn expansion_alternates_players() {
        let tree = tree_with_children(3);
        assert_eq!(tree.len(), 4);
        let children = tree.node(tree.root()).children().to_vec();
        assert_eq!(children, vec![1, 2, 3]);
        for (expected_action, &child) in children.iter().enumerate() {
            let node = tree.node(child);
            assert_eq!(node.parent(), Some(tree.root()));
            assert_eq!(node.action(), Some(expected_action as u8));
            assert_eq!(node.player(), Player::One);
            assert_eq!(node.visits(), 0);
        }
    }

    #[test]
    fn update_value_perspective() {
        let mut tree = tree_with_children(1);
        let child = tree.node_mut(1);
        child.update_value(Some(Player::One));
        assert_eq!(child.value(), 1.0);
        child.update_value(None);
        assert_eq!(child.value(), 1.5);
        child.update_value(Some(Player::Two));
        assert_eq!(child.value(), 1.5);
    }

    #[test]
    fn no_children() {
        let tree = Tree::<u8>::new(Player::One);
        let mut rng = Scripted::new(&[]);
        assert_eq!(tree.select_best_child(tree.root(), 10, 1.41, &mut rng), None);
        assert_eq!(tree.best_action(10, &mut rng), None);
    }

    #[test]
    fn exploitation_prefers_unvisited() {
        let mut tree = tree_with_children(2);
        visit(&mut tree, 1, 50, Some(Player::One));
        let mut rng = Scripted::new(&[]);
        assert_eq!(tree.select_best_child(tree.root(), 50, 0.0, &mut rng), Some(2));
    }

    #[test]
    fn exploitation_picks_best_mean() {
        let mut tree = tree_with_children(3);
        visit(&mut tree, 1, 10, None);
        visit(&mut tree, 2, 10, Some(Player::One));
        visit(&mut tree, 3, 10, Some(Player::Two));
        let mut rng = Scripted::new(&[]);
        assert_eq!(tree.best_action(30, &mut rng), Some(1));
        assert_eq!(tree.node(2).mean_value(), 1.0);
        assert_eq!(tree.node(1).mean_value(), 0.5);
    }

    #[test]
    fn exploration_bonus() {
        let mut tree = tree_with_children(2);
        visit(&mut tree, 1, 100, None);
        visit(&mut tree, 2, 2, Some(Player::Two));
        let mut rng = Scripted::new(&[]);
        // Mean 0.5 with a small bonus loses to mean 0 with a large one.
        assert_eq!(tree.select_best_child(tree.root(), 102, 1.41, &mut rng), Some(2));
        assert_eq!(tree.select_best_child(tree.root(), 102, 0.0, &mut rng), Some(1));
        let expected = 0.5 + 1.41 * (102_f64.ln() / 100.0).sqrt();
        assert!((tree.node(1).upper_confidence_bound(102, 1.41) - expected).abs() < 1e-12);
    }

    #[test]
    fn tie_break_scans_in_order() {
        let tree = tree_with_children(3);
        // First child is taken without a flip, each tied challenger flips once.
        let mut rng = Scripted::new(&[false, true]);
        assert_eq!(tree.select_best_child(tree.root(), 1, 1.41, &mut rng), Some(3));
        assert!(rng.flips.is_empty());

        let mut rng = Scripted::new(&[true, false]);
        assert_eq!(tree.select_best_child(tree.root(), 1, 1.41, &mut rng), Some(2));

        let mut rng = Scripted::new(&[false, false]);
        assert_eq!(tree.select_best_child(tree.root(), 1, 1.41, &mut rng), Some(1));
    }

    #[test]
    fn strictly_better_child_needs_no_flip() {
        let mut tree = tree_with_children(2);
        visit(&mut tree, 1, 4, Some(Player::Two));
        // The unvisited second child is strictly better, no flips are drawn.
        let mut rng = Scripted::new(&[]);
        assert_eq!(tree.select_best_child(tree.root(), 4, 1.41, &mut rng), Some(2));
    }
}
