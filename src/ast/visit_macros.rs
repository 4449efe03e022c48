macro_rules! define_visit_api {
    ($trait_name:ident, [$($ref:tt)+]) => {
        macro_rules! try_visit {
            ($expr:expr) => {
                match $expr {
                    ControlFlow::Continue(()) => {}
                    ControlFlow::Break(b) => return ControlFlow::Break(b),
                }
            };
        }

pub trait $trait_name {
    /// Early-exit payload produced when traversal stops.
    type Break;

    fn visit_query(&mut self, query: $($ref)+ Query) -> VisitResult<Self::Break> {
        walk_query(self, query)
    }

    fn visit_statement(&mut self, statement: $($ref)+ Statement) -> VisitResult<Self::Break> {
        walk_statement(self, statement)
    }

    fn visit_simple(&mut self, _statement: $($ref)+ SimpleStatement) -> VisitResult<Self::Break> {
        ControlFlow::Continue(())
    }

    fn visit_group(&mut self, group: $($ref)+ GroupBlock) -> VisitResult<Self::Break> {
        walk_group(self, group)
    }

    fn visit_where(&mut self, block: $($ref)+ WhereBlock) -> VisitResult<Self::Break> {
        walk_where(self, block)
    }

    fn visit_update(&mut self, block: $($ref)+ UpdateBlock) -> VisitResult<Self::Break> {
        walk_update(self, block)
    }

    fn visit_projection(&mut self, block: $($ref)+ ProjectionBlock) -> VisitResult<Self::Break> {
        walk_projection(self, block)
    }

    fn visit_construct(&mut self, block: $($ref)+ ConstructBlock) -> VisitResult<Self::Break> {
        walk_construct(self, block)
    }

    fn visit_ask(&mut self, block: $($ref)+ AskBlock) -> VisitResult<Self::Break> {
        walk_ask(self, block)
    }
}

/// Walks every top-level statement of a query.
pub fn walk_query<V: $trait_name + ?Sized>(
    visitor: &mut V,
    query: $($ref)+ Query,
) -> VisitResult<V::Break> {
    walk_statements(visitor, $($ref)+ query.statements)
}

/// Dispatches a statement to the matching `visit_*` method.
pub fn walk_statement<V: $trait_name + ?Sized>(
    visitor: &mut V,
    statement: $($ref)+ Statement,
) -> VisitResult<V::Break> {
    match statement {
        Statement::Simple(simple) => visitor.visit_simple(simple),
        Statement::Group(group) => visitor.visit_group(group),
        Statement::Where(block) => visitor.visit_where(block),
        Statement::Update(block) => visitor.visit_update(block),
        Statement::Select(block) | Statement::Describe(block) => visitor.visit_projection(block),
        Statement::Construct(block) => visitor.visit_construct(block),
        Statement::Ask(block) => visitor.visit_ask(block),
    }
}

pub fn walk_group<V: $trait_name + ?Sized>(
    visitor: &mut V,
    group: $($ref)+ GroupBlock,
) -> VisitResult<V::Break> {
    walk_statements(visitor, $($ref)+ group.statements)
}

pub fn walk_where<V: $trait_name + ?Sized>(
    visitor: &mut V,
    block: $($ref)+ WhereBlock,
) -> VisitResult<V::Break> {
    walk_statements(visitor, $($ref)+ block.statements)
}

/// Walks an update template, then its WHERE body.
pub fn walk_update<V: $trait_name + ?Sized>(
    visitor: &mut V,
    block: $($ref)+ UpdateBlock,
) -> VisitResult<V::Break> {
    try_visit!(walk_statements(visitor, $($ref)+ block.statements));
    if let Some(where_block) = $($ref)+ block.where_block {
        try_visit!(visitor.visit_where(where_block));
    }
    ControlFlow::Continue(())
}

pub fn walk_projection<V: $trait_name + ?Sized>(
    visitor: &mut V,
    block: $($ref)+ ProjectionBlock,
) -> VisitResult<V::Break> {
    walk_statements(visitor, $($ref)+ block.statements)
}

pub fn walk_construct<V: $trait_name + ?Sized>(
    visitor: &mut V,
    block: $($ref)+ ConstructBlock,
) -> VisitResult<V::Break> {
    walk_statements(visitor, $($ref)+ block.statements)
}

pub fn walk_ask<V: $trait_name + ?Sized>(
    visitor: &mut V,
    block: $($ref)+ AskBlock,
) -> VisitResult<V::Break> {
    walk_statements(visitor, $($ref)+ block.statements)
}

fn walk_statements<V: $trait_name + ?Sized>(
    visitor: &mut V,
    statements: $($ref)+ [Statement],
) -> VisitResult<V::Break> {
    for statement in statements {
        try_visit!(visitor.visit_statement(statement));
    }
    ControlFlow::Continue(())
}

    };
}

pub(crate) use define_visit_api;
