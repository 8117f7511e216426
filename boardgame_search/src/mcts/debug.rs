use super::*;

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeDump<T> {
    #[cfg_attr(feature = "serde", serde(rename = "_"))]
    pub value: T,
    #[cfg_attr(feature = "serde", serde(rename = "children"))]
    pub children: Vec<Rc<TreeDump<T>>>,
}

impl<T> TreeDump<T> {
    pub fn new(value: T, children: Vec<Rc<TreeDump<T>>>) -> Self {
        Self { value, children }
    }
}

impl<G: Game> NodeData<G> {
    fn debug_description(&self, children_count: usize, describe_action: &dyn Fn(G::Action) -> String) -> String {
        let action_part = if let Some(action) = self.action {
            describe_action(action)
        } else {
            "[Root]".to_string()
        };
        format!(
            "{action_part} by {}: {:+.1}/{} = {:+.3}, #children = {}, #untried = {}",
            self.player,
            self.value,
            self.visits,
            self.mean_value(),
            children_count,
            self.untried.len()
        )
    }
}

impl<G: Game, S: SelectionPolicy<G>, R: Rng> MCTS<G, S, R> {
    /// Describe the subtree under `token`, down to `max_depth` levels.
    pub fn dump_tree(
        &self,
        token: Token,
        max_depth: u8,
        describe_action: &dyn Fn(G::Action) -> String,
    ) -> TreeDump<String> {
        if max_depth == 0 {
            return Default::default();
        }

        let Some(node) = self.tree.get(token) else {
            return Default::default();
        };

        let children_count = node.children(&self.tree).count();
        let desc = node.data.debug_description(children_count, describe_action);
        let max_depth_1 = max_depth - 1;
        let children = node
            .children(&self.tree)
            .map(|child| Rc::new(self.dump_tree(child.token(), max_depth_1, describe_action)))
            .filter(|child| !(child.children.is_empty() && child.value.is_empty()))
            .collect();
        TreeDump::new(desc, children)
    }

    /// Log the most visited part of the tree at debug level. Children with
    /// fewer than `min_n` visits are summarized in one line.
    pub fn print_tree(&self, token: Token, depth: u8, max_depth: u8, min_n: u32) {
        if depth > max_depth {
            return;
        }

        let Some(node) = self.tree.get(token) else {
            return;
        };

        fn indent_prefix(indent_depth: u8) -> String {
            let mut s = "  ".repeat(indent_depth as usize);
            s += "- ";
            s
        }

        let node_part = node
            .data
            .debug_description(node.children(&self.tree).count(), &|a| format!("{a:?}"));
        debug!("{}{}", indent_prefix(depth), node_part);
        let (mut omitted, mut omitted_visits) = (0, 0);
        let mut found = false;
        let children = node
            .children(&self.tree)
            .sorted_by_key(|c| std::cmp::Reverse(c.data.visits))
            .collect_vec();
        let c = children.len();
        for (i, child) in children.iter().enumerate() {
            let n = child.data.visits;
            if n != 0 && (c <= 1 || depth == 0 || n >= min_n || i == 0) {
                found = depth < max_depth;
                self.print_tree(child.token(), depth + 1, max_depth, min_n);
            } else {
                omitted += 1;
                omitted_visits += n;
            }
        }

        if found && omitted > 0 {
            debug!(
                "{}...[{omitted} omitted] ({omitted_visits} visits)",
                indent_prefix(depth + 1)
            );
        }
    }
}
