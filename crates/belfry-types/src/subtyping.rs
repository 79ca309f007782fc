//! Subtype checking.
//!
//! Resolution only ever asks one question of the type system, "is `A` a
//! subtype of `B`", so it is expressed as the [`SubtypeOracle`] trait. That
//! keeps filtering rules testable with a stub oracle that returns fixed answers.

use std::collections::HashMap;

use belfry_core::Name;

use crate::{ClassId, ClassTable, Type, TypeArg, TypeKind, Variance};

/// Answers subtyping queries. Implementations must be total.
pub trait SubtypeOracle<'db> {
    fn is_subtype_of(&self, subtype: Type<'db>, supertype: Type<'db>) -> bool;
}

/// Nominal subtype checker over a [`ClassTable`].
pub struct TypeChecker<'a, 'db> {
    db: &'db dyn salsa::Database,
    classes: &'a ClassTable<'db>,
}

impl<'a, 'db> TypeChecker<'a, 'db> {
    pub fn new(db: &'db dyn salsa::Database, classes: &'a ClassTable<'db>) -> Self {
        Self { db, classes }
    }

    fn check(&self, subtype: Type<'db>, supertype: Type<'db>) -> bool {
        if subtype == supertype {
            return true;
        }

        let db = self.db;
        if subtype.is_error(db) || supertype.is_error(db) {
            return true;
        }
        if subtype.is_nullable(db) && !supertype.is_nullable(db) {
            return false;
        }

        match (subtype.kind(db), supertype.kind(db)) {
            (TypeKind::Parameter { name: sub, .. }, TypeKind::Parameter { name: sup, .. }) => {
                sub == sup
            }
            // Type parameters are bounded by the nullable root class.
            (TypeKind::Parameter { .. }, TypeKind::Class { class, .. }) => {
                *class == self.classes.root() && supertype.is_nullable(db)
            }
            (
                TypeKind::Class {
                    class: sub_class,
                    args: sub_args,
                    ..
                },
                TypeKind::Class {
                    class: sup_class,
                    args: sup_args,
                    ..
                },
            ) => {
                if *sup_class == self.classes.root() {
                    return true;
                }
                let Some(lifted) = self.supertype_args(*sub_class, sub_args, *sup_class, 0) else {
                    return false;
                };
                self.args_contained(*sup_class, &lifted, sup_args)
            }
            _ => false,
        }
    }

    /// Arguments of `target` as seen from `class<args>`, or `None` if `target`
    /// is not a superclass of `class`.
    fn supertype_args(
        &self,
        class: ClassId<'db>,
        args: &[TypeArg<'db>],
        target: ClassId<'db>,
        depth: usize,
    ) -> Option<Vec<TypeArg<'db>>> {
        if class == target {
            return Some(args.to_vec());
        }
        // A well-formed hierarchy never gets this deep; cycles are cut here.
        if depth > 64 {
            return None;
        }

        let substitution = self.substitution_for(class, args);
        self.classes.supertypes(class).iter().find_map(|supertype| {
            let super_class = supertype.class_id(self.db)?;
            let super_args: Vec<_> = supertype
                .args(self.db)
                .iter()
                .map(|arg| self.substitute_arg(arg, &substitution))
                .collect();
            self.supertype_args(super_class, &super_args, target, depth + 1)
        })
    }

    fn substitution_for(
        &self,
        class: ClassId<'db>,
        args: &[TypeArg<'db>],
    ) -> HashMap<Name, TypeArg<'db>> {
        let Some(info) = self.classes.get(class) else {
            return HashMap::new();
        };
        info.type_parameters
            .iter()
            .enumerate()
            .map(|(i, param)| (param.name, args.get(i).cloned().unwrap_or(TypeArg::Star)))
            .collect()
    }

    fn substitute_arg(
        &self,
        arg: &TypeArg<'db>,
        substitution: &HashMap<Name, TypeArg<'db>>,
    ) -> TypeArg<'db> {
        let Some(ty) = arg.ty() else {
            return TypeArg::Star;
        };

        if let TypeKind::Parameter { name, nullable } = ty.kind(self.db)
            && let Some(replacement) = substitution.get(name)
        {
            let nullable = *nullable;
            let adjust = |ty: &Type<'db>| {
                if nullable {
                    ty.with_nullability(self.db, true)
                } else {
                    *ty
                }
            };
            return match (arg, replacement) {
                (_, TypeArg::Star) => TypeArg::Star,
                (TypeArg::Invariant(_), TypeArg::Invariant(r)) => TypeArg::Invariant(adjust(r)),
                (TypeArg::Invariant(_) | TypeArg::Out(_), TypeArg::Out(r))
                | (TypeArg::Out(_), TypeArg::Invariant(r)) => TypeArg::Out(adjust(r)),
                (TypeArg::Invariant(_) | TypeArg::In(_), TypeArg::In(r))
                | (TypeArg::In(_), TypeArg::Invariant(r)) => TypeArg::In(adjust(r)),
                // Conflicting projections collapse to a star.
                _ => TypeArg::Star,
            };
        }

        let substituted = self.substitute_type(ty, substitution);
        match arg {
            TypeArg::Star => TypeArg::Star,
            TypeArg::Invariant(_) => TypeArg::Invariant(substituted),
            TypeArg::Out(_) => TypeArg::Out(substituted),
            TypeArg::In(_) => TypeArg::In(substituted),
        }
    }

    fn substitute_type(
        &self,
        ty: Type<'db>,
        substitution: &HashMap<Name, TypeArg<'db>>,
    ) -> Type<'db> {
        match ty.kind(self.db) {
            TypeKind::Parameter { name, nullable } => match substitution.get(name) {
                Some(TypeArg::Star) => Type::simple(self.db, self.classes.root())
                    .with_nullability(self.db, true),
                Some(replacement) => replacement
                    .ty()
                    .map(|r| if *nullable { r.with_nullability(self.db, true) } else { r })
                    .unwrap_or(ty),
                None => ty,
            },
            TypeKind::Class {
                class,
                args,
                nullable,
            } => {
                let args = args
                    .iter()
                    .map(|arg| self.substitute_arg(arg, substitution))
                    .collect();
                Type::class(self.db, *class, args, *nullable)
            }
            TypeKind::Error => ty,
        }
    }

    /// Check that each argument of `sub_args` is contained in the matching
    /// argument of `sup_args`, honouring the declared variance of `class`.
    fn args_contained(
        &self,
        class: ClassId<'db>,
        sub_args: &[TypeArg<'db>],
        sup_args: &[TypeArg<'db>],
    ) -> bool {
        let variances: Vec<Variance> = self
            .classes
            .get(class)
            .map(|info| info.type_parameters.iter().map(|p| p.variance).collect())
            .unwrap_or_default();

        sup_args.iter().enumerate().all(|(i, sup_arg)| {
            let sub_arg = sub_args.get(i).unwrap_or(&TypeArg::Star);
            let declared = variances.get(i).copied().unwrap_or_default();
            self.arg_contained(sub_arg, sup_arg, declared)
        })
    }

    fn arg_contained(&self, sub: &TypeArg<'db>, sup: &TypeArg<'db>, declared: Variance) -> bool {
        let (variance, sup_ty) = match sup {
            TypeArg::Star => return true,
            TypeArg::Invariant(ty) => (declared, *ty),
            TypeArg::Out(ty) => (Variance::Out, *ty),
            TypeArg::In(ty) => (Variance::In, *ty),
        };

        match (variance, sub) {
            (_, TypeArg::Star) => false,
            (Variance::Invariant, TypeArg::Invariant(sub_ty)) => {
                self.check(*sub_ty, sup_ty) && self.check(sup_ty, *sub_ty)
            }
            (Variance::Invariant, _) => false,
            (Variance::Out, TypeArg::Invariant(sub_ty) | TypeArg::Out(sub_ty)) => {
                self.check(*sub_ty, sup_ty)
            }
            (Variance::In, TypeArg::Invariant(sub_ty) | TypeArg::In(sub_ty)) => {
                self.check(sup_ty, *sub_ty)
            }
            _ => false,
        }
    }
}

impl<'db> SubtypeOracle<'db> for TypeChecker<'_, 'db> {
    fn is_subtype_of(&self, subtype: Type<'db>, supertype: Type<'db>) -> bool {
        let result = self.check(subtype, supertype);
        tracing::trace!(
            subtype = %subtype.display(self.db),
            supertype = %supertype.display(self.db),
            result,
            "subtype check"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassInfo, ClassKind, TypeParameter};

    struct Fixture<'db> {
        db: &'db dyn salsa::Database,
        table: ClassTable<'db>,
    }

    impl<'db> Fixture<'db> {
        fn new(db: &'db dyn salsa::Database) -> Self {
            let root = ClassId::from_fq_name(db, "core.Any");
            Self {
                db,
                table: ClassTable::new(root),
            }
        }

        fn class(&mut self, fq_name: &str, supertypes: Vec<Type<'db>>) -> ClassId<'db> {
            let id = ClassId::from_fq_name(self.db, fq_name);
            self.table
                .insert(ClassInfo::new(id, ClassKind::Class).with_supertypes(supertypes));
            id
        }

        fn generic(
            &mut self,
            fq_name: &str,
            params: Vec<TypeParameter>,
            supertypes: Vec<Type<'db>>,
        ) -> ClassId<'db> {
            let id = ClassId::from_fq_name(self.db, fq_name);
            self.table.insert(
                ClassInfo::new(id, ClassKind::Interface)
                    .with_type_parameters(params)
                    .with_supertypes(supertypes),
            );
            id
        }

        fn ty(&self, class: ClassId<'db>) -> Type<'db> {
            Type::simple(self.db, class)
        }

        fn checker(&self) -> TypeChecker<'_, 'db> {
            TypeChecker::new(self.db, &self.table)
        }
    }

    #[test]
    fn nominal_subclassing_is_transitive() {
        let db = salsa::DatabaseImpl::new();
        let mut fx = Fixture::new(&db);
        let shape = fx.class("app.Shape", vec![]);
        let shape_ty = fx.ty(shape);
        let polygon = fx.class("app.Polygon", vec![shape_ty]);
        let polygon_ty = fx.ty(polygon);
        let square = fx.class("app.Square", vec![polygon_ty]);
        let unrelated = fx.class("app.Color", vec![]);

        let checker = fx.checker();
        assert!(checker.is_subtype_of(fx.ty(square), fx.ty(shape)));
        assert!(!checker.is_subtype_of(fx.ty(shape), fx.ty(square)));
        assert!(!checker.is_subtype_of(fx.ty(unrelated), fx.ty(shape)));
        assert!(checker.is_subtype_of(fx.ty(unrelated), fx.ty(fx.table.root())));
    }

    #[test]
    fn nullability_is_respected() {
        let db = salsa::DatabaseImpl::new();
        let mut fx = Fixture::new(&db);
        let shape = fx.class("app.Shape", vec![]);
        let non_null = fx.ty(shape);
        let nullable = non_null.with_nullability(&db, true);

        let checker = fx.checker();
        assert!(checker.is_subtype_of(non_null, nullable));
        assert!(!checker.is_subtype_of(nullable, non_null));
        assert!(checker.is_subtype_of(nullable, nullable));
    }

    #[test]
    fn star_projection_accepts_any_argument() {
        let db = salsa::DatabaseImpl::new();
        let mut fx = Fixture::new(&db);
        let t = Name::new("T");
        let list = fx.generic("core.List", vec![TypeParameter::invariant(t)], vec![]);
        let string = fx.class("core.String", vec![]);
        let list_of_string = Type::class(
            &db,
            list,
            vec![TypeArg::Invariant(fx.ty(string))],
            false,
        );

        let checker = fx.checker();
        let star = list_of_string.star_projected(&db, true);
        assert!(checker.is_subtype_of(list_of_string, star));
        assert!(!checker.is_subtype_of(star, list_of_string));
    }

    #[test]
    fn supertype_arguments_are_substituted() {
        let db = salsa::DatabaseImpl::new();
        let mut fx = Fixture::new(&db);
        let t = Name::new("T");
        let e = Name::new("E");
        let collection = fx.generic(
            "core.Collection",
            vec![TypeParameter {
                name: e,
                variance: Variance::Out,
            }],
            vec![],
        );
        let collection_of_t = Type::class(
            &db,
            collection,
            vec![TypeArg::Invariant(Type::parameter(&db, t, false))],
            false,
        );
        let list = fx.generic(
            "core.List",
            vec![TypeParameter::invariant(t)],
            vec![collection_of_t],
        );
        let shape = fx.class("app.Shape", vec![]);
        let shape_ty = fx.ty(shape);
        let square = fx.class("app.Square", vec![shape_ty]);

        let list_of_square = Type::class(
            &db,
            list,
            vec![TypeArg::Invariant(fx.ty(square))],
            false,
        );
        let collection_of_shape = Type::class(
            &db,
            collection,
            vec![TypeArg::Invariant(shape_ty)],
            false,
        );
        let list_of_shape = Type::class(&db, list, vec![TypeArg::Invariant(shape_ty)], false);

        let checker = fx.checker();
        // Collection is covariant, List is not.
        assert!(checker.is_subtype_of(list_of_square, collection_of_shape));
        assert!(!checker.is_subtype_of(list_of_square, list_of_shape));
    }

    #[test]
    fn type_parameters_only_fit_the_nullable_root() {
        let db = salsa::DatabaseImpl::new();
        let fx = Fixture::new(&db);
        let t = Type::parameter(&db, Name::new("T"), false);
        let root = fx.ty(fx.table.root());

        let checker = fx.checker();
        assert!(checker.is_subtype_of(t, root.with_nullability(&db, true)));
        assert!(!checker.is_subtype_of(t, root));
        assert!(checker.is_subtype_of(t, t));
    }

    #[test]
    fn error_type_is_compatible_with_everything() {
        let db = salsa::DatabaseImpl::new();
        let mut fx = Fixture::new(&db);
        let shape = fx.class("app.Shape", vec![]);
        let error = Type::error(&db);

        let checker = fx.checker();
        assert!(checker.is_subtype_of(error, fx.ty(shape)));
        assert!(checker.is_subtype_of(fx.ty(shape), error));
    }
}
