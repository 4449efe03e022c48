//! Mutable query-tree visitor infrastructure.

use std::ops::ControlFlow;

use crate::ast::query::Query;
use crate::ast::statement::{
    AskBlock, ConstructBlock, GroupBlock, ProjectionBlock, SimpleStatement, Statement,
    UpdateBlock, WhereBlock,
};

use super::visit::VisitResult;
use super::visit_macros::define_visit_api;

define_visit_api!(VisitMut, [&mut]);

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::{VisitMut, walk_group};
    use crate::ast::statement::GroupBlock;
    use crate::parse;

    struct MakeOptional;

    impl VisitMut for MakeOptional {
        type Break = ();

        fn visit_group(&mut self, group: &mut GroupBlock) -> ControlFlow<Self::Break> {
            group.optional = true;
            walk_group(self, group)
        }
    }

    #[test]
    fn mutable_visitor_can_retag_groups() {
        let mut query = parse("SELECT ?s WHERE { ?s ?p ?o . { ?s a ?t } }").expect("query parses");

        let flow = MakeOptional.visit_query(&mut query);

        assert!(matches!(flow, ControlFlow::Continue(())));
        assert!(query.serialize().contains("OPTIONAL {\n?s a ?t\n}"));
    }
}
