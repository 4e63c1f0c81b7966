//! Syntax tree built from the flat token stream.

use crate::error::TreeError;
use crate::token::Token;

/// Tokens backing a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTokens {
    /// The document root has no tokens.
    Root,
    /// A container: paired opening and closing tokens.
    Nester { opening: Token, closing: Token },
    /// A self-contained token such as `inline`, `fence` or `hr`.
    Leaf(Token),
}

/// A node of the block syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    tokens: NodeTokens,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Fold a token stream into a tree rooted at a `root` node.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, TreeError> {
        let mut root = Vec::new();
        let mut stack: Vec<(Token, Vec<SyntaxNode>)> = Vec::new();

        for token in tokens {
            let node = match token.nesting {
                1 => {
                    stack.push((token, Vec::new()));
                    continue;
                }
                -1 => {
                    let Some((opening, children)) = stack.pop() else {
                        return Err(TreeError::UnexpectedClose { kind: token.kind });
                    };
                    if opening.base_kind() != token.base_kind() {
                        return Err(TreeError::Mismatched {
                            opening: opening.kind,
                            closing: token.kind,
                        });
                    }
                    SyntaxNode {
                        tokens: NodeTokens::Nester {
                            opening,
                            closing: token,
                        },
                        children,
                    }
                }
                _ => SyntaxNode {
                    tokens: NodeTokens::Leaf(token),
                    children: Vec::new(),
                },
            };

            match stack.last_mut() {
                Some((_, children)) => children.push(node),
                None => root.push(node),
            }
        }

        if let Some((opening, _)) = stack.pop() {
            return Err(TreeError::Unclosed { kind: opening.kind });
        }
        Ok(SyntaxNode {
            tokens: NodeTokens::Root,
            children: root,
        })
    }

    /// Node type: `root`, the container base type (`blockquote`), or the
    /// leaf token type (`inline`).
    #[must_use]
    pub fn node_type(&self) -> &str {
        match &self.tokens {
            NodeTokens::Root => "root",
            NodeTokens::Nester { opening, .. } => opening.base_kind(),
            NodeTokens::Leaf(token) => &token.kind,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &NodeTokens {
        &self.tokens
    }

    #[must_use]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.tokens, NodeTokens::Root)
    }

    /// Opening and closing tokens of a container node.
    #[must_use]
    pub fn nester_tokens(&self) -> Option<(&Token, &Token)> {
        match &self.tokens {
            NodeTokens::Nester { opening, closing } => Some((opening, closing)),
            _ => None,
        }
    }

    /// The token describing this node: the opening token of a container or
    /// the token of a leaf.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        match &self.tokens {
            NodeTokens::Root => None,
            NodeTokens::Nester { opening, .. } => Some(opening),
            NodeTokens::Leaf(token) => Some(token),
        }
    }

    /// Source line range of the node.
    #[must_use]
    pub fn map(&self) -> Option<(usize, usize)> {
        self.token().and_then(|t| t.map)
    }

    /// Text payload of a leaf node, empty for containers.
    #[must_use]
    pub fn content(&self) -> &str {
        match &self.tokens {
            NodeTokens::Leaf(token) => &token.content,
            _ => "",
        }
    }

    /// Whether the node's token is hidden (tight list paragraphs).
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.token().is_some_and(|t| t.hidden)
    }

    /// Pre-order traversal starting at this node.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Text content of every leaf below this node, one leaf per line.
    #[must_use]
    pub fn text(&self) -> String {
        self.walk()
            .filter(|node| !node.content().is_empty())
            .map(|node| node.content().trim_end_matches('\n'))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::BlockParser;

    #[test]
    fn test_tree_shape() {
        let tree = BlockParser::commonmark()
            .parse_tree("> a\n\n- b\n")
            .unwrap();

        assert!(tree.is_root());
        let types: Vec<_> = tree.walk().map(SyntaxNode::node_type).collect();
        assert_eq!(
            types,
            vec![
                "root",
                "blockquote",
                "paragraph",
                "inline",
                "bullet_list",
                "list_item",
                "paragraph",
                "inline",
            ]
        );
        assert_eq!(tree.children()[0].map(), Some((0, 1)));
    }

    #[test]
    fn test_text_collects_leaves() {
        let tree = BlockParser::commonmark()
            .parse_tree("# T\n\n```\ncode\n```\n\npara\n")
            .unwrap();

        assert_eq!(tree.text(), "T\ncode\npara");
    }

    #[test]
    fn test_unexpected_close() {
        let err = SyntaxNode::from_tokens(vec![Token::new("div_close", "div", -1)]).unwrap_err();

        assert_eq!(
            err,
            TreeError::UnexpectedClose {
                kind: "div_close".to_owned()
            }
        );
    }

    #[test]
    fn test_mismatched_close() {
        let tokens = vec![
            Token::new("alert_open", "div", 1),
            Token::new("blockquote_close", "blockquote", -1),
        ];

        assert!(matches!(
            SyntaxNode::from_tokens(tokens),
            Err(TreeError::Mismatched { .. })
        ));
    }

    #[test]
    fn test_unclosed() {
        let err = SyntaxNode::from_tokens(vec![Token::new("alert_open", "div", 1)]).unwrap_err();

        assert_eq!(
            err,
            TreeError::Unclosed {
                kind: "alert_open".to_owned()
            }
        );
    }
}
