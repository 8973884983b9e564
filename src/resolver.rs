//! Dependency-ordered scheduling of components.
//!
//! Components are stable-sorted by [`LoaderPriority`]( crate::LoaderPriority ) once,
//! then scanned in repeated readiness passes. Every component whose dependencies
//! have all resolved is run as soon as the scan reaches it, so a component that
//! becomes ready part-way through a pass still runs in that pass. Only successful
//! components enter the resolved set; a failed component is never retried and its
//! dependents stay blocked.
//!
//! A pass that resolves no component is a **stall**: a cycle, a dependency that
//! never registered, a dependency whose initializer failed, or a pass in which
//! every eligible initializer failed. Stalls are fatal to the load and reported
//! as a [`DependencyStallError`] describing each component the pass scanned.

use std::collections::HashSet ;
use itertools::Itertools ;
use nonempty_collections::{ NEVec, NonEmptyIterator };
use pipe_trait::Pipe ;

use crate::component::{ Component, ComponentInitError };



/// Why a dependency of a stalled component is not satisfied.
#[derive( Debug, Clone, PartialEq, Eq, Hash )]
pub enum UnmetDependency {
    /// No component with this name was registered.
    Missing( String ),
    /// The dependency's initializer failed.
    Failed( String ),
    /// The dependency is registered but is itself blocked (e.g. part of a cycle).
    Unresolved( String ),
}

impl UnmetDependency {
    pub fn name( &self ) -> &str {
        match self {
            Self::Missing( name ) | Self::Failed( name ) | Self::Unresolved( name ) => name,
        }
    }
}

impl std::fmt::Display for UnmetDependency {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        match self {
            Self::Missing( name ) => write!( f, "missing '{}'", name ),
            Self::Failed( name ) => write!( f, "failed '{}'", name ),
            Self::Unresolved( name ) => write!( f, "unresolved '{}'", name ),
        }
    }
}

/// Why a component is part of a stall.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum StallCause {
    /// Its own initializer failed in the pass that resolved nothing.
    InitializerFailed,
    /// It waits on dependencies that never resolved.
    Blocked( Vec<UnmetDependency> ),
}

/// A component that could not resolve in the stalled pass.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct StalledComponent {
    pub component: String,
    pub cause: StallCause,
}

impl StalledComponent {
    /// The dependencies still unmet. Empty when the component's own initializer failed.
    pub fn unmet( &self ) -> &[UnmetDependency] {
        match &self.cause {
            StallCause::InitializerFailed => &[],
            StallCause::Blocked( unmet ) => unmet,
        }
    }
}

impl std::fmt::Display for StalledComponent {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        match &self.cause {
            StallCause::InitializerFailed => write!( f, "'{}' failed to initialize", self.component ),
            StallCause::Blocked( unmet ) => write!( f, "'{}' waits on {}", self.component, unmet.iter().join( ", " )),
        }
    }
}

/// A resolution pass resolved no component.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct DependencyStallError {
    stalled: NEVec<StalledComponent>,
}

impl DependencyStallError {

    /// Every component scanned in the stalled pass, in scan order.
    pub fn stalled( &self ) -> &NEVec<StalledComponent> { &self.stalled }

    pub fn components( &self ) -> Vec<&str> {
        self.stalled.iter().map(| stalled | stalled.component.as_str() ).collect()
    }

    pub fn is_stalled( &self, component: &str ) -> bool {
        self.stalled.iter().any(| stalled | stalled.component == component )
    }

    fn diagnose<C: AsRef<Component>>(
        scanned: &NEVec<String>,
        pending: &[C],
        registered: &HashSet<String>,
        resolved: &HashSet<String>,
        failed: &HashSet<String>,
    ) -> Self {
        let stalled = scanned.nonempty_iter()
            .map(| name | {
                let cause = match pending.iter().find(| component | component.as_ref().name() == name ) {
                    None => StallCause::InitializerFailed,
                    Some( component ) => component.as_ref().dependencies().iter()
                        .filter(| dependency | !resolved.contains( *dependency ))
                        .map(| dependency | match ( registered.contains( dependency ), failed.contains( dependency )) {
                            ( false, _ ) => UnmetDependency::Missing( dependency.clone() ),
                            ( true, true ) => UnmetDependency::Failed( dependency.clone() ),
                            ( true, false ) => UnmetDependency::Unresolved( dependency.clone() ),
                        })
                        .collect::<Vec<_>>()
                        .pipe( StallCause::Blocked ),
                };
                StalledComponent { component: name.clone(), cause }
            })
            .collect::<NEVec<_>>();
        Self { stalled }
    }

}

impl std::fmt::Display for DependencyStallError {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        write!( f, "Loading components stalled: {}", self.stalled.iter().join( "; " ))
    }
}

impl std::error::Error for DependencyStallError {}

/// Outcome of a resolution run.
///
/// `resolved` holds the components whose initializers succeeded, in the order
/// they ran, and is populated on both success and stall so callers can undo
/// whatever did start. `errors` holds the initializer failures that were
/// isolated along the way.
#[derive( Debug )]
pub struct Resolution<C = Component> {
    pub resolved: Vec<C>,
    pub result: Result<(), DependencyStallError>,
    pub errors: Vec<ComponentInitError>,
}

impl<C: AsRef<Component>> Resolution<C> {
    pub fn resolved_names( &self ) -> Vec<&str> {
        self.resolved.iter().map(| component | component.as_ref().name() ).collect()
    }
}

/// Runs `run` on every component in a dependency-respecting order.
///
/// Returning `Err` from `run` marks the component as failed: it is left out of
/// the resolved set and never retried.
pub fn resolve(
    components: Vec<Component>,
    run: impl FnMut( &Component ) -> Result<(), ComponentInitError>,
) -> Resolution {
    schedule( components, run )
}

/// Computes the order [`resolve`] would use if every initializer succeeded.
///
/// # Errors
/// Returns the stall that loading these components would run into.
pub fn plan( components: &[Component] ) -> Result<Vec<String>, DependencyStallError> {
    schedule( components.iter().collect::<Vec<&Component>>(), | _ | Ok(()) )
        .pipe(| Resolution { resolved, result, errors: _ } | result.map(| () | resolved.into_iter()
            .map(| component | component.name().to_string() )
            .collect()
        ))
}

fn schedule<C: AsRef<Component>>(
    components: Vec<C>,
    mut run: impl FnMut( &Component ) -> Result<(), ComponentInitError>,
) -> Resolution<C> {

    let registered = components.iter()
        .map(| component | component.as_ref().name().to_string() )
        .collect::<HashSet<_>>();

    // Stable, so equal priorities keep registration order within a pass.
    let mut pending = components.into_iter()
        .sorted_by_key(| component | component.as_ref().priority() )
        .collect::<Vec<_>>();

    let mut resolved_names = HashSet::with_capacity( pending.len() );
    let mut failed_names = HashSet::new();
    let mut resolved = Vec::with_capacity( pending.len() );
    let mut errors = Vec::new();
    let mut pass = 0_usize ;

    while let Some( batch ) = NEVec::try_from_vec( pending ) {

        pass += 1 ;
        let scanned = batch.nonempty_iter()
            .map(| component | component.as_ref().name().to_string() )
            .collect::<NEVec<_>>();
        let resolved_before = resolved.len();
        let mut blocked = Vec::with_capacity( batch.len().get() );

        for component in batch {
            let ready = component.as_ref().dependencies().iter()
                .all(| dependency | resolved_names.contains( dependency ));
            if !ready {
                blocked.push( component );
                continue ;
            }

            let name = component.as_ref().name().to_string();
            match run( component.as_ref() ) {
                Ok(()) => {
                    resolved_names.insert( name );
                    resolved.push( component );
                },
                Err( err ) => {
                    failed_names.insert( name );
                    errors.push( err );
                },
            }
        }

        pending = blocked ;
        tracing::debug!( pass, resolved = resolved.len(), pending = pending.len(), "Resolution pass finished" );

        if resolved.len() == resolved_before {
            let stall = DependencyStallError::diagnose( &scanned, &pending, &registered, &resolved_names, &failed_names );
            return Resolution { resolved, result: Err( stall ), errors };
        }

    }

    Resolution { resolved, result: Ok(()), errors }

}



#[cfg( test )]
mod tests {

    use super::* ;
    use crate::LoaderPriority ;

    fn component( name: &str, dependencies: &[&str] ) -> Component {
        Component::new( name, || Ok(()), || Ok(()) ).with_dependencies( dependencies.iter().copied() )
    }

    #[test]
    fn plan_orders_chain_registered_backwards() {
        let components = vec![ component( "c", &[ "b" ]), component( "a", &[] ), component( "b", &[ "a" ]) ];
        assert_eq!( plan( &components ).unwrap(), vec![ "a", "b", "c" ]);
    }

    #[test]
    fn ready_component_runs_in_same_pass() {
        // "b" is scanned after "a" resolves, so both run in the first pass.
        let components = vec![ component( "a", &[] ), component( "b", &[ "a" ]) ];
        let mut order = Vec::new();
        let resolution = resolve( components, | component | { order.push( component.name().to_string() ); Ok(()) });
        assert!( resolution.result.is_ok() );
        assert_eq!( order, vec![ "a", "b" ]);
    }

    #[test]
    fn priority_breaks_ties_only() {
        let components = vec![
            component( "late", &[] ).with_priority( LoaderPriority::Lowest ),
            component( "early", &[ "late" ]).with_priority( LoaderPriority::Highest ),
            component( "middle", &[] ),
        ];
        assert_eq!( plan( &components ).unwrap(), vec![ "middle", "late", "early" ]);
    }

    #[test]
    fn stall_classifies_unmet_dependencies() {
        let components = vec![
            component( "x", &[ "y" ]),
            component( "y", &[ "x" ]),
            component( "z", &[ "missing" ]),
        ];
        let stall = plan( &components ).unwrap_err();
        assert_eq!( stall.components(), vec![ "x", "y", "z" ]);
        let z = stall.stalled().iter().find(| s | s.component == "z" ).unwrap();
        assert_eq!( z.unmet(), &[ UnmetDependency::Missing( "missing".into() )]);
        assert_eq!(
            stall.to_string(),
            "Loading components stalled: 'x' waits on unresolved 'y'; 'y' waits on unresolved 'x'; 'z' waits on missing 'missing'",
        );
    }

    #[test]
    fn failed_dependency_is_reported_as_failed() {
        let components = vec![ component( "d", &[] ), component( "e", &[ "d" ]) ];
        let resolution = resolve( components, | component | match component.name() {
            "d" => Err( ComponentInitError { component: "d".into(), reason: "no device".into() }),
            _ => Ok(()),
        });
        assert!( resolution.resolved.is_empty() );
        assert_eq!( resolution.errors.len(), 1 );
        let stall = resolution.result.unwrap_err();
        assert_eq!( stall.components(), vec![ "d", "e" ]);
        assert_eq!( stall.stalled().first().cause, StallCause::InitializerFailed );
        assert_eq!( stall.stalled()[1].unmet(), &[ UnmetDependency::Failed( "d".into() )]);
    }

    #[test]
    fn pass_of_only_failures_stalls() {
        let components = vec![ component( "base", &[] ), component( "late", &[ "base" ]) ];
        let mut calls = 0 ;
        let resolution = resolve( components, | component | {
            calls += 1 ;
            match component.name() {
                "late" => Err( ComponentInitError { component: "late".into(), reason: "no encoder".into() }),
                _ => Ok(()),
            }
        });
        // "late" ran in the same pass as "base", so that pass made progress.
        assert!( resolution.result.is_ok() );
        assert_eq!( calls, 2 );

        let components = vec![ component( "late", &[ "base" ]), component( "base", &[] ) ];
        let resolution = resolve( components, | component | match component.name() {
            "late" => Err( ComponentInitError { component: "late".into(), reason: "no encoder".into() }),
            _ => Ok(()),
        });
        // Here "late" only becomes ready in the second pass, which then resolves nothing.
        let stall = resolution.result.as_ref().unwrap_err();
        assert_eq!( stall.to_string(), "Loading components stalled: 'late' failed to initialize" );
        assert_eq!( resolution.resolved_names(), vec![ "base" ]);
    }

    #[test]
    fn failure_without_dependents_does_not_stall() {
        let components = vec![ component( "flaky", &[] ), component( "solid", &[] ) ];
        let resolution = resolve( components, | component | match component.name() {
            "flaky" => Err( ComponentInitError { component: "flaky".into(), reason: "oops".into() }),
            _ => Ok(()),
        });
        assert!( resolution.result.is_ok() );
        assert_eq!( resolution.resolved_names(), vec![ "solid" ]);
    }

}
